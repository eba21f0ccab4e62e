//! Transaction mutation rules.
//!
//! Every create and update passes through [`TransactionRules`] so the shape
//! invariants hold no matter what the caller supplied:
//!
//! - recurring transactions have `total = 1` and `current = 0`
//! - debit transactions are single-installment and paid on the spot
//! - `current_installment` never exceeds `total_installments`

use chrono::{DateTime, NaiveDate, Utc};
use fatura_shared::types::{TransactionId, UserId};
use validator::Validate;

use super::error::InputError;
use super::input::{CreateTransactionInput, UpdateTransactionInput};
use super::types::{Transaction, TransactionStatus, TransactionType};

/// Transaction mutation rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionRules;

impl TransactionRules {
    /// Validates `input` and builds the transaction to insert.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Validation` when a field fails validation.
    pub fn build_new(
        user_id: UserId,
        input: CreateTransactionInput,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Transaction, InputError> {
        input.validate()?;

        let mut transaction = Transaction {
            id: TransactionId::new(),
            user_id,
            account_id: input.account_id,
            category_id: input.category_id,
            title: input.title.trim().to_string(),
            description: input.description,
            amount: input.amount,
            transaction_type: input.transaction_type,
            status: input.status.unwrap_or(TransactionStatus::Unpaid),
            paid_date: input.paid_date,
            total_installments: input.total_installments.unwrap_or(1),
            current_installment: 0,
            is_recurring: input.is_recurring,
            created_at: input.created_at.unwrap_or(now),
            updated_at: now,
            deleted_at: None,
        };

        if transaction.transaction_type == TransactionType::Debit {
            transaction.paid_date = Some(today);
        }
        Self::normalize(&mut transaction, today);

        Ok(transaction)
    }

    /// Validates `patch` and applies it on top of `existing`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Validation` when a field fails validation.
    pub fn apply_update(
        existing: &Transaction,
        patch: UpdateTransactionInput,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Transaction, InputError> {
        patch.validate()?;

        let mut transaction = existing.clone();
        if let Some(title) = patch.title {
            transaction.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            transaction.description = description;
        }
        if let Some(amount) = patch.amount {
            transaction.amount = amount;
        }
        if let Some(transaction_type) = patch.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(status) = patch.status {
            transaction.status = status;
        }
        if let Some(paid_date) = patch.paid_date {
            transaction.paid_date = paid_date;
        }
        if let Some(total) = patch.total_installments {
            transaction.total_installments = total;
        }
        if let Some(current) = patch.current_installment {
            transaction.current_installment = current;
        }
        if let Some(is_recurring) = patch.is_recurring {
            transaction.is_recurring = is_recurring;
        }
        if let Some(account_id) = patch.account_id {
            transaction.account_id = account_id;
        }
        if let Some(category_id) = patch.category_id {
            transaction.category_id = category_id;
        }

        if transaction.is_recurring && transaction.transaction_type == TransactionType::Credit {
            transaction.paid_date = None;
        }
        Self::normalize(&mut transaction, today);
        transaction.updated_at = now;

        Ok(transaction)
    }

    /// Enforces the shape invariants in place.
    pub fn normalize(transaction: &mut Transaction, today: NaiveDate) {
        transaction.total_installments = transaction.total_installments.max(1);

        if transaction.transaction_type == TransactionType::Debit {
            transaction.status = TransactionStatus::Paid;
            transaction.paid_date = transaction.paid_date.or(Some(today));
            transaction.total_installments = 1;
            transaction.current_installment = 1;
            transaction.is_recurring = false;
        } else if transaction.is_recurring {
            transaction.total_installments = 1;
            transaction.current_installment = 0;
        }

        transaction.current_installment = transaction
            .current_installment
            .min(transaction.total_installments);
    }

    /// Soft-deletes a transaction.
    #[must_use]
    pub fn remove(transaction: &Transaction, now: DateTime<Utc>) -> Transaction {
        Transaction {
            deleted_at: Some(now),
            updated_at: now,
            ..transaction.clone()
        }
    }

    /// Reverts a soft delete.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NotRemoved` if the transaction is not deleted.
    pub fn restore(transaction: &Transaction, now: DateTime<Utc>) -> Result<Transaction, InputError> {
        if !transaction.is_deleted() {
            return Err(InputError::NotRemoved);
        }
        Ok(Transaction {
            deleted_at: None,
            updated_at: now,
            ..transaction.clone()
        })
    }
}
