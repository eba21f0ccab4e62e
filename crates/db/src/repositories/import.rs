//! Batch import of transactions.
//!
//! Bank and category names resolve against the user's own accounts and
//! categories. The batch is all or nothing.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use fatura_core::import::{ImportError as RowError, ImportResolver, ImportRow};
use fatura_core::transaction::{Transaction, TransactionRules};
use fatura_shared::types::UserId;
use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use tracing::info;

use super::transaction::{self as transaction_repo, TransactionError};
use crate::records;

/// Error types for imports.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// A row could not be resolved. Carries the sheet line.
    #[error(transparent)]
    Row(#[from] RowError),

    /// A resolved row was rejected.
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Database error. Nothing was imported.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Import repository.
#[derive(Debug, Clone)]
pub struct ImportRepository {
    db: DatabaseConnection,
}

impl ImportRepository {
    /// Creates a new import repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts one transaction per row.
    ///
    /// # Errors
    ///
    /// Returns the first failing row's error; no row is inserted then.
    pub async fn import(
        &self,
        user_id: UserId,
        rows: &[ImportRow],
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<Vec<Transaction>, ImportError> {
        let txn = self.db.begin().await?;

        let accounts: HashMap<String, _> = records::load_accounts(&txn, user_id)
            .await?
            .into_values()
            .map(|a| (a.bank_name, a.id))
            .collect();
        let categories: HashMap<String, _> = records::load_categories(&txn, user_id)
            .await?
            .into_values()
            .map(|c| (c.name, c.id))
            .collect();

        let inputs = ImportResolver::resolve(
            rows,
            |name| accounts.get(name).copied(),
            |name| categories.get(name).copied(),
        )?;

        let mut imported = Vec::with_capacity(inputs.len());
        for input in inputs {
            let transaction = TransactionRules::build_new(user_id, input, now, today)
                .map_err(TransactionError::from)?;
            transaction_repo::insert(&txn, &transaction).await?;
            imported.push(transaction);
        }

        txn.commit().await?;
        info!(user_id = %user_id, count = imported.len(), "transactions imported");
        Ok(imported)
    }
}
