//! Transaction domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fatura_shared::types::{
    AccountId, CategoryId, TransactionId, UserId, split_share,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::InputError;
use crate::billing::{BillingAccount, DueDay};

/// Transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Billed on a credit invoice, possibly in installments.
    Credit,
    /// Paid on the spot.
    Debit,
}

impl TransactionType {
    /// Lowercase name used in storage and imports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(InputError::UnknownType(s.to_string())),
        }
    }
}

/// Transaction payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Not yet fully paid.
    Unpaid,
    /// Fully paid.
    Paid,
    /// Past due.
    Overdue,
}

impl TransactionStatus {
    /// Lowercase name used in storage and imports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            _ => Err(InputError::UnknownStatus(s.to_string())),
        }
    }
}

/// A persisted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning user.
    pub user_id: UserId,
    /// Account the purchase was made with.
    pub account_id: Option<AccountId>,
    /// Spending category.
    pub category_id: Option<CategoryId>,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Full purchase amount.
    pub amount: Decimal,
    /// Credit or debit.
    pub transaction_type: TransactionType,
    /// Payment status.
    pub status: TransactionStatus,
    /// Date the transaction became fully paid.
    pub paid_date: Option<NaiveDate>,
    /// Number of installments (at least 1).
    pub total_installments: u32,
    /// Installments paid so far (never above `total_installments`).
    pub current_installment: u32,
    /// Repeats every month with no end.
    pub is_recurring: bool,
    /// Purchase timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Installment count, treating zero as one.
    #[must_use]
    pub fn installments(&self) -> u32 {
        self.total_installments.max(1)
    }

    /// Amount billed for the 1-based `installment`.
    ///
    /// Leftover cents of `amount / installments` go to the earliest
    /// installments, so all installments together bill exactly `amount`.
    #[must_use]
    pub fn installment_amount(&self, installment: u32) -> Decimal {
        split_share(self.amount, self.installments(), installment)
    }

    /// Amount billed for the installment the next payment settles.
    #[must_use]
    pub fn next_installment_amount(&self) -> Decimal {
        self.installment_amount(self.current_installment + 1)
    }

    /// True when the purchase is billed in a single month.
    #[must_use]
    pub fn is_single_installment(&self) -> bool {
        self.installments() <= 1
    }

    /// True when fully paid.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == TransactionStatus::Paid
    }

    /// True when soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// True for credit transactions.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionType::Credit
    }
}

/// Category name and id attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

/// A transaction together with the account and category it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The transaction.
    pub transaction: Transaction,
    /// Linked account with its bank.
    pub account: Option<BillingAccount>,
    /// Linked category.
    pub category: Option<CategoryRef>,
}

impl TransactionRecord {
    /// Wraps a transaction with no account or category.
    #[must_use]
    pub const fn bare(transaction: Transaction) -> Self {
        Self {
            transaction,
            account: None,
            category: None,
        }
    }

    /// Due day of the linked account.
    #[must_use]
    pub fn due_day(&self) -> Option<DueDay> {
        self.account.as_ref().and_then(|a| a.due_day)
    }

    /// Bank name of the linked account.
    #[must_use]
    pub fn bank_name(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.bank_name.as_str())
    }

    /// Name of the linked category.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}
