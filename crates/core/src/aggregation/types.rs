//! Month group read models.

use chrono::{DateTime, NaiveDate, Utc};
use fatura_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::billing::MonthKey;
use crate::transaction::{TransactionStatus, TransactionType};

/// Sort order of month groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthOrder {
    /// Oldest month first.
    Ascending,
    /// Newest month first.
    Descending,
}

/// All installments charged in one billing month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    /// Billing month.
    pub month_key: MonthKey,
    /// Portuguese label, e.g. "Abril 2024".
    pub month_label: String,
    /// Sum of the installment amounts charged in the month.
    pub total_spent: Decimal,
    /// True when the paid ledger has a row for the month.
    pub is_paid: bool,
    /// Installments charged in the month.
    pub items: Vec<MonthItem>,
}

/// One installment row inside a month group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthItem {
    /// `"{transaction_id}-{installment_index}"`.
    pub id: String,
    /// Source transaction.
    pub transaction_id: TransactionId,
    /// Transaction title.
    pub title: String,
    /// Transaction description.
    pub description: Option<String>,
    /// Full purchase amount.
    pub amount: Decimal,
    /// Contribution to the month.
    pub installment_amount: Decimal,
    /// Credit or debit.
    pub transaction_type: TransactionType,
    /// Payment status.
    pub status: TransactionStatus,
    /// Purchase timestamp.
    pub created_at: DateTime<Utc>,
    /// Date fully paid.
    pub paid_date: Option<NaiveDate>,
    /// Installment count.
    pub total_installments: u32,
    /// Installments paid so far.
    pub current_installment: u32,
    /// Installment number charged in this month, `None` for single payments.
    pub display_installment: Option<u32>,
    /// Repeats monthly.
    pub is_recurring: bool,
    /// Bank of the linked account.
    pub bank_name: Option<String>,
    /// Category name.
    pub category_name: Option<String>,
}
