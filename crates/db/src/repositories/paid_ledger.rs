//! Paid ledger reads.
//!
//! Rows are written only by the settlement repository.

use fatura_core::billing::MonthKey;
use fatura_core::settlement::{LedgerScope, PaidLedgerEntry, PaidMonths, scope_key};
use fatura_shared::types::{AccountId, UserId};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::paid_months;
use crate::records;

/// Paid ledger repository.
#[derive(Debug, Clone)]
pub struct PaidLedgerRepository {
    db: DatabaseConnection,
}

impl PaidLedgerRepository {
    /// Creates a new paid ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Every ledger row of the user, oldest month first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored month key is malformed.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<PaidLedgerEntry>, DbErr> {
        paid_months::Entity::find()
            .filter(paid_months::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(paid_months::Column::MonthKey)
            .order_by_asc(paid_months::Column::ScopeKey)
            .all(&self.db)
            .await?
            .into_iter()
            .map(records::ledger_entry)
            .collect()
    }

    /// The ledger row for one month and account scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find(
        &self,
        user_id: UserId,
        month_key: MonthKey,
        account_id: Option<AccountId>,
    ) -> Result<Option<PaidLedgerEntry>, DbErr> {
        paid_months::Entity::find()
            .filter(paid_months::Column::UserId.eq(user_id.into_inner()))
            .filter(paid_months::Column::MonthKey.eq(month_key.to_string()))
            .filter(paid_months::Column::ScopeKey.eq(scope_key(account_id)))
            .one(&self.db)
            .await?
            .map(records::ledger_entry)
            .transpose()
    }

    /// Paid months snapshot for reads in `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn paid_months(
        &self,
        user_id: UserId,
        scope: LedgerScope,
    ) -> Result<PaidMonths, DbErr> {
        let entries = self.list(user_id).await?;
        Ok(PaidMonths::from_entries(&entries, scope))
    }
}
