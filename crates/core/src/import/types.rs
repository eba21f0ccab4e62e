//! Import row.

use serde::Deserialize;

/// One spreadsheet row, fields as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImportRow {
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Amount, `.` or `,` as decimal separator.
    pub amount: String,
    /// `credit` or `debit`.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// `unpaid`, `paid` or `overdue`.
    #[serde(default)]
    pub status: Option<String>,
    /// Installment count.
    #[serde(default)]
    pub total_installments: Option<u32>,
    /// Paid installments.
    #[serde(default)]
    pub current_installment: Option<u32>,
    /// Recurrence flag, read leniently.
    #[serde(default)]
    pub is_recurring: Option<String>,
    /// Bank name of the account used.
    #[serde(default, alias = "bank_user_name")]
    pub bank_name: Option<String>,
    /// Category name.
    #[serde(default)]
    pub category_name: Option<String>,
}
