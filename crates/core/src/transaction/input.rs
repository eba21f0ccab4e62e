//! Validated transaction inputs.

use chrono::{DateTime, NaiveDate, Utc};
use fatura_shared::types::{AccountId, CategoryId, has_money_scale};
use rust_decimal::Decimal;
use validator::{Validate, ValidationError};

use super::types::{TransactionStatus, TransactionType};

/// Upper bound on `total_installments`.
pub const MAX_INSTALLMENTS: u32 = 360;

/// Input for creating a transaction.
#[derive(Debug, Clone, Validate)]
pub struct CreateTransactionInput {
    /// Short title.
    #[validate(
        length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Full purchase amount.
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    /// Credit or debit.
    pub transaction_type: TransactionType,
    /// Initial status (defaults to unpaid).
    pub status: Option<TransactionStatus>,
    /// Paid date, if already paid.
    pub paid_date: Option<NaiveDate>,
    /// Number of installments (defaults to 1).
    #[validate(range(min = 1, max = 360, message = "Installments must be between 1 and 360"))]
    pub total_installments: Option<u32>,
    /// Ignored on creation: credit purchases always start at installment 0.
    #[validate(range(max = 360))]
    pub current_installment: Option<u32>,
    /// Repeats monthly.
    pub is_recurring: bool,
    /// Account used.
    pub account_id: Option<AccountId>,
    /// Category.
    pub category_id: Option<CategoryId>,
    /// Purchase timestamp for backdated entries (defaults to now).
    pub created_at: Option<DateTime<Utc>>,
}

impl CreateTransactionInput {
    /// Minimal input with every optional field unset.
    #[must_use]
    pub fn new(title: impl Into<String>, amount: Decimal, transaction_type: TransactionType) -> Self {
        Self {
            title: title.into(),
            description: None,
            amount,
            transaction_type,
            status: None,
            paid_date: None,
            total_installments: None,
            current_installment: None,
            is_recurring: false,
            account_id: None,
            category_id: None,
            created_at: None,
        }
    }
}

/// Patch for an existing transaction.
///
/// `None` leaves a field untouched. Nullable fields use `Some(None)` to clear.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateTransactionInput {
    /// New title.
    #[validate(
        length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New amount.
    #[validate(custom(function = "validate_amount"))]
    pub amount: Option<Decimal>,
    /// New type.
    pub transaction_type: Option<TransactionType>,
    /// New status.
    pub status: Option<TransactionStatus>,
    /// New paid date.
    pub paid_date: Option<Option<NaiveDate>>,
    /// New installment count.
    #[validate(range(min = 1, max = 360, message = "Installments must be between 1 and 360"))]
    pub total_installments: Option<u32>,
    /// New paid installment count.
    #[validate(range(max = 360))]
    pub current_installment: Option<u32>,
    /// New recurrence flag.
    pub is_recurring: Option<bool>,
    /// New account.
    pub account_id: Option<Option<AccountId>>,
    /// New category.
    pub category_id: Option<Option<CategoryId>>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Title cannot be blank".into()));
    }
    Ok(())
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(
            ValidationError::new("negative").with_message("Amount cannot be negative".into())
        );
    }
    if !has_money_scale(*amount) {
        return Err(ValidationError::new("scale")
            .with_message("Amount must have at most two decimal places".into()));
    }
    Ok(())
}
