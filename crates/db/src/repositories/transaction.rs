//! Transaction repository.
//!
//! Shape invariants live in `fatura_core::transaction::TransactionRules`; this
//! repository checks ownership of the referenced account and category and
//! persists the result.

use chrono::{DateTime, NaiveDate, Utc};
use fatura_core::transaction::{
    CreateTransactionInput, InputError, Transaction, TransactionRecord, TransactionRules,
    UpdateTransactionInput,
};
use fatura_shared::types::{AccountId, CategoryId, TransactionId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::entities::{accounts, categories, transactions};
use crate::records::{self, RecordFilter};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found (or owned by another user).
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    /// Referenced account is not the user's.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Referenced category is not the user's.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Input rejected.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and inserts a new transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input fails validation
    /// - the account or category is not the user's
    pub async fn create(
        &self,
        user_id: UserId,
        input: CreateTransactionInput,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Transaction, TransactionError> {
        let transaction = TransactionRules::build_new(user_id, input, now, today)?;
        check_references(&self.db, &transaction).await?;
        insert(&self.db, &transaction).await?;
        Ok(transaction)
    }

    /// Applies a patch to one of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is missing, the patch is invalid
    /// or names an account or category the user does not own.
    pub async fn update(
        &self,
        user_id: UserId,
        id: TransactionId,
        patch: UpdateTransactionInput,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Transaction, TransactionError> {
        let existing = self.find_transaction(user_id, id).await?;
        let updated = TransactionRules::apply_update(&existing, patch, now, today)?;
        check_references(&self.db, &updated).await?;
        records::transaction_to_active(&updated)
            .update(&self.db)
            .await?;
        Ok(updated)
    }

    /// Soft-deletes one of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is missing.
    pub async fn remove(
        &self,
        user_id: UserId,
        id: TransactionId,
        now: DateTime<Utc>,
    ) -> Result<Transaction, TransactionError> {
        let existing = self.find_transaction(user_id, id).await?;
        let removed = TransactionRules::remove(&existing, now);
        records::transaction_to_active(&removed)
            .update(&self.db)
            .await?;
        Ok(removed)
    }

    /// Reverts a soft delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is missing or not removed.
    pub async fn restore(
        &self,
        user_id: UserId,
        id: TransactionId,
        now: DateTime<Utc>,
    ) -> Result<Transaction, TransactionError> {
        let existing = self.find_transaction(user_id, id).await?;
        let restored = TransactionRules::restore(&existing, now)?;
        records::transaction_to_active(&restored)
            .update(&self.db)
            .await?;
        Ok(restored)
    }

    /// Finds one of the user's transactions, removed ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<Option<Transaction>, TransactionError> {
        let model = transactions::Entity::find_by_id(id.into_inner())
            .filter(transactions::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await?;
        Ok(model.map(records::transaction_from_model))
    }

    /// Lists the user's live transactions with account and category, oldest
    /// first, optionally limited to one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_records(
        &self,
        user_id: UserId,
        account_id: Option<AccountId>,
    ) -> Result<Vec<TransactionRecord>, TransactionError> {
        let filter = RecordFilter {
            account_id,
            ..RecordFilter::default()
        };
        Ok(records::load_records(&self.db, user_id, filter).await?)
    }

    /// Lists the user's removed transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_removed(&self, user_id: UserId) -> Result<Vec<TransactionRecord>, TransactionError> {
        let filter = RecordFilter {
            include_deleted: true,
            ..RecordFilter::default()
        };
        let records = records::load_records(&self.db, user_id, filter).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.transaction.is_deleted())
            .collect())
    }

    async fn find_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> Result<Transaction, TransactionError> {
        self.find(user_id, id)
            .await?
            .ok_or(TransactionError::NotFound(id))
    }
}

/// Fails unless the account and category are owned by the transaction's user.
pub(crate) async fn check_references<C: ConnectionTrait>(
    conn: &C,
    transaction: &Transaction,
) -> Result<(), TransactionError> {
    let user = transaction.user_id.into_inner();

    if let Some(account_id) = transaction.account_id {
        let owned = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::UserId.eq(user))
            .count(conn)
            .await?;
        if owned == 0 {
            return Err(TransactionError::AccountNotFound(account_id));
        }
    }

    if let Some(category_id) = transaction.category_id {
        let owned = categories::Entity::find_by_id(category_id.into_inner())
            .filter(categories::Column::UserId.eq(user))
            .count(conn)
            .await?;
        if owned == 0 {
            return Err(TransactionError::CategoryNotFound(category_id));
        }
    }

    Ok(())
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    transaction: &Transaction,
) -> Result<(), DbErr> {
    transactions::Entity::insert(records::transaction_to_active(transaction))
        .exec_without_returning(conn)
        .await?;
    Ok(())
}
