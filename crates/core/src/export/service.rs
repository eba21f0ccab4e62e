//! Export row mapping.

use chrono::{DateTime, Utc};
use fatura_shared::types::{AccountId, CategoryId, TransactionId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::billing::{BillingCalendar, MonthKey};
use crate::transaction::{TransactionRecord, TransactionStatus, TransactionType};

/// Exported account reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportAccount {
    /// Account ID.
    pub id: AccountId,
    /// Bank name.
    pub bank_name: String,
}

/// Exported category reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

/// One exported transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// Transaction ID.
    pub id: TransactionId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Full amount.
    pub amount: Decimal,
    /// Credit or debit.
    pub transaction_type: TransactionType,
    /// Payment status.
    pub status: TransactionStatus,
    /// Purchase timestamp.
    pub created_at: DateTime<Utc>,
    /// Installment count.
    pub total_installments: u32,
    /// Installments paid.
    pub current_installment: u32,
    /// Repeats monthly.
    pub is_recurring: bool,
    /// Purchase month.
    pub year_month: MonthKey,
    /// Purchase month label.
    pub month_label: String,
    /// Billing month for credit, purchase month for debit.
    pub invoice_month: MonthKey,
    /// Invoice month label.
    pub invoice_month_label: String,
    /// Per-month amount for credit, full amount for debit.
    pub installment_amount: Decimal,
    /// `dd/mm/YYYY HH:MM` in the billing time zone.
    pub created_at_formatted: String,
    /// Linked account.
    pub account: Option<ExportAccount>,
    /// Linked category.
    pub category: Option<ExportCategory>,
}

/// Export filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportFilter {
    /// Only this account.
    pub account_id: Option<AccountId>,
    /// Only this category.
    pub category_id: Option<CategoryId>,
}

/// Maps transactions to export rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportService;

impl ExportService {
    /// Export rows for the records passing `filter`, newest first.
    pub fn rows(
        calendar: &BillingCalendar,
        records: &[TransactionRecord],
        filter: &ExportFilter,
    ) -> Vec<ExportRow> {
        let mut selected: Vec<&TransactionRecord> = records
            .iter()
            .filter(|r| {
                let tx = &r.transaction;
                !tx.is_deleted()
                    && filter
                        .account_id
                        .is_none_or(|id| tx.account_id == Some(id))
                    && filter
                        .category_id
                        .is_none_or(|id| tx.category_id == Some(id))
            })
            .collect();
        selected.sort_by(|a, b| b.transaction.created_at.cmp(&a.transaction.created_at));

        selected
            .into_iter()
            .map(|record| Self::row(calendar, record))
            .collect()
    }

    /// Export row of one record.
    #[must_use]
    pub fn row(calendar: &BillingCalendar, record: &TransactionRecord) -> ExportRow {
        let tx = &record.transaction;
        let local = tx.created_at.with_timezone(&calendar.timezone());
        let year_month = MonthKey::from_date(local.date_naive());

        let (invoice_month, installment_amount) = match tx.transaction_type {
            TransactionType::Credit => (
                calendar.resolve_billing_month_key(tx, record.account.as_ref()),
                tx.installment_amount(1),
            ),
            TransactionType::Debit => (year_month, tx.amount),
        };

        ExportRow {
            id: tx.id,
            title: tx.title.clone(),
            description: tx.description.clone(),
            amount: tx.amount,
            transaction_type: tx.transaction_type,
            status: tx.status,
            created_at: tx.created_at,
            total_installments: tx.total_installments,
            current_installment: tx.current_installment,
            is_recurring: tx.is_recurring,
            year_month,
            month_label: year_month.label(),
            invoice_month,
            invoice_month_label: invoice_month.label(),
            installment_amount,
            created_at_formatted: local.format("%d/%m/%Y %H:%M").to_string(),
            account: record.account.as_ref().map(|a| ExportAccount {
                id: a.id,
                bank_name: a.bank_name.clone(),
            }),
            category: record.category.as_ref().map(|c| ExportCategory {
                id: c.id,
                name: c.name.clone(),
            }),
        }
    }
}
