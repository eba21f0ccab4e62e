//! Account repository: a user's links to banks, with their invoice due day.

use fatura_core::billing::{BillingAccount, BillingError, DueDay};
use fatura_shared::types::{AccountId, BankId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::{accounts, banks};
use crate::records::{self, billing_account};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found (or owned by another user).
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Bank not found.
    #[error("Bank not found: {0}")]
    BankNotFound(BankId),

    /// The user already has an account at this bank.
    #[error("Account for bank '{0}' already exists")]
    Duplicate(String),

    /// Due day outside 1..=31.
    #[error(transparent)]
    InvalidDueDay(#[from] BillingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Links `user_id` to a bank.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the bank does not exist
    /// - the user already has an account at that bank
    /// - `due_day` is outside 1..=31
    pub async fn create(
        &self,
        user_id: UserId,
        bank_id: BankId,
        due_day: Option<u32>,
    ) -> Result<BillingAccount, AccountError> {
        let due_day = due_day.map(DueDay::new).transpose()?;

        let bank = banks::Entity::find_by_id(bank_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(AccountError::BankNotFound(bank_id))?;

        let existing = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .filter(accounts::Column::BankId.eq(bank_id.into_inner()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::Duplicate(bank.name));
        }

        let now = chrono::Utc::now();
        let account = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            bank_id: Set(bank_id.into_inner()),
            due_day: Set(due_day.map(|d| records::from_count(d.day()))),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(billing_account(&account, Some(&bank)))
    }

    /// Changes or clears the due day.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not the user's or the day is invalid.
    pub async fn set_due_day(
        &self,
        user_id: UserId,
        account_id: AccountId,
        due_day: Option<u32>,
    ) -> Result<BillingAccount, AccountError> {
        let due_day = due_day.map(DueDay::new).transpose()?;

        let existing = self.find_model(user_id, account_id).await?;
        let mut active: accounts::ActiveModel = existing.into();
        active.due_day = Set(due_day.map(|d| records::from_count(d.day())));
        active.updated_at = Set(chrono::Utc::now());
        let updated = active.update(&self.db).await?;

        let bank = banks::Entity::find_by_id(updated.bank_id)
            .one(&self.db)
            .await?;
        Ok(billing_account(&updated, bank.as_ref()))
    }

    /// Finds one of the user's accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<BillingAccount>, AccountError> {
        let row = accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .find_also_related(banks::Entity)
            .one(&self.db)
            .await?;
        Ok(row.map(|(account, bank)| billing_account(&account, bank.as_ref())))
    }

    /// Lists the user's accounts by bank name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<BillingAccount>, AccountError> {
        let mut accounts: Vec<BillingAccount> = records::load_accounts(&self.db, user_id)
            .await?
            .into_values()
            .collect();
        accounts.sort_by(|a, b| a.bank_name.cmp(&b.bank_name));
        Ok(accounts)
    }

    async fn find_model(
        &self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(account_id.into_inner())
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(account_id))
    }
}
