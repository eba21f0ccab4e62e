//! Dashboard types.

use fatura_shared::types::{AccountId, CategoryId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregation::MonthGroup;
use crate::billing::MonthKey;
use crate::settlement::LedgerScope;
use crate::transaction::Transaction;

/// Label used for transactions without a category.
pub const UNCATEGORIZED_LABEL: &str = "Sem categoria";

/// Filters shared by every dashboard read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Only transactions of this account.
    pub account_id: Option<AccountId>,
    /// Only transactions of this category.
    pub category_id: Option<CategoryId>,
    /// Ledger rows to consider when marking months paid.
    pub ledger_scope: LedgerScope,
}

impl DashboardQuery {
    /// Query scoped to one account (or all accounts).
    #[must_use]
    pub const fn for_account(account_id: Option<AccountId>) -> Self {
        Self {
            account_id,
            category_id: None,
            ledger_scope: LedgerScope::for_account(account_id),
        }
    }

    /// True when the transaction passes the account and category filters.
    #[must_use]
    pub fn matches(&self, transaction: &Transaction) -> bool {
        !transaction.is_deleted()
            && self
                .account_id
                .is_none_or(|id| transaction.account_id == Some(id))
            && self
                .category_id
                .is_none_or(|id| transaction.category_id == Some(id))
    }
}

/// Credit invoices grouped per month, with the month to act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyOverview {
    /// Groups, oldest first.
    pub groups: Vec<MonthGroup>,
    /// Effective month.
    pub current_month_key: MonthKey,
}

/// Status totals over the filtered transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BaseStats {
    /// Paid credit amounts.
    pub total_income: Decimal,
    /// Paid debit amounts.
    pub total_expenses: Decimal,
    /// Unpaid credit amounts.
    pub pending_income: Decimal,
    /// Unpaid debit amounts.
    pub pending_expenses: Decimal,
    /// Overdue transactions.
    pub overdue_count: usize,
}

/// One month of the dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    /// Calendar month.
    pub month_key: MonthKey,
    /// Short label, e.g. "Abr 2024".
    pub month_label: String,
    /// Paid ledger total for the month.
    pub invoice_total: Decimal,
    /// Debits created in the month.
    pub debit_total: Decimal,
}

/// Spending of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpending {
    /// Category, `None` for uncategorized.
    pub category_id: Option<CategoryId>,
    /// Category name or [`UNCATEGORIZED_LABEL`].
    pub category_name: String,
    /// Summed amount.
    pub total: Decimal,
}

/// Everything the dashboard header shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Status totals.
    #[serde(flatten)]
    pub base: BaseStats,
    /// Effective billing month.
    pub current_month_key: MonthKey,
    /// Label of the effective group, if there is one.
    pub current_month_label: Option<String>,
    /// Amount due for the effective month.
    pub current_month_pending_bill: Decimal,
    /// Debits created in the current calendar month.
    pub current_month_debit_total: Decimal,
    /// Last six calendar months, oldest first.
    pub monthly_summary: Vec<MonthSummary>,
    /// Top categories of the last 30 days.
    pub top_spending_categories: Vec<CategorySpending>,
}
