//! Month settlement.
//!
//! `pay_month` reads the candidates, advances them and accumulates the paid
//! ledger in one database transaction. Any failure rolls the whole payment
//! back.

use std::collections::HashMap;

use chrono::NaiveDate;
use fatura_core::BillingEngine;
use fatura_core::settlement::{PayMonthCommand, PayMonthOutcome, SettlementEngine, scope_key};
use fatura_shared::types::{AccountId, PaidLedgerId};
use sea_orm::sea_query::{Alias, Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::entities::{accounts, paid_months};
use crate::records::{self, RecordFilter};

/// Error types for settlement.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    /// The command names an account the user does not own.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Database error. Nothing was persisted.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Settlement repository.
#[derive(Debug, Clone)]
pub struct SettlementRepository {
    db: DatabaseConnection,
}

impl SettlementRepository {
    /// Creates a new settlement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pays every installment the user owes for `command.month_key`.
    ///
    /// A month with no candidates succeeds with a zero amount and writes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not the user's or any statement
    /// fails, in which case no transaction or ledger row has changed.
    pub async fn pay_month(
        &self,
        engine: &BillingEngine,
        command: PayMonthCommand,
        today: NaiveDate,
    ) -> Result<PayMonthOutcome, SettlementError> {
        let txn = self.db.begin().await?;

        if let Some(account_id) = command.account_id {
            let owned = accounts::Entity::find_by_id(account_id.into_inner())
                .filter(accounts::Column::UserId.eq(command.user_id.into_inner()))
                .count(&txn)
                .await?;
            if owned == 0 {
                return Err(SettlementError::AccountNotFound(account_id));
            }
        }

        let filter = RecordFilter {
            account_id: command.account_id,
            include_deleted: false,
            lock: true,
        };
        let records = records::load_records(&txn, command.user_id, filter).await?;
        let plan = engine.settlement().plan(command, &records, today);

        if plan.is_empty() {
            debug!(user_id = %command.user_id, month = %command.month_key, "nothing to pay");
            return Ok(plan.outcome());
        }

        let now = chrono::Utc::now();
        let by_id: HashMap<_, _> = records
            .iter()
            .map(|r| (r.transaction.id, &r.transaction))
            .collect();

        for (id, advance) in plan.advances() {
            let Some(existing) = by_id.get(&id) else {
                continue;
            };
            let mut transaction = (*existing).clone();
            SettlementEngine::apply_advance(&mut transaction, advance);
            transaction.updated_at = now;
            records::transaction_to_active(&transaction)
                .update(&txn)
                .await?;
        }

        if plan.touches_ledger() {
            accumulate_ledger(&txn, &command, plan.total_attributed(), today).await?;
        }

        txn.commit().await?;

        let outcome = plan.outcome();
        info!(
            user_id = %command.user_id,
            month = %command.month_key,
            amount = %outcome.amount_paid,
            advanced = outcome.transactions_advanced,
            completed = outcome.transactions_completed,
            "month settled"
        );
        Ok(outcome)
    }
}

/// Adds `amount` to the ledger row of the command's scope in one statement,
/// creating the row when missing.
async fn accumulate_ledger(
    txn: &DatabaseTransaction,
    command: &PayMonthCommand,
    amount: rust_decimal::Decimal,
    today: NaiveDate,
) -> Result<(), DbErr> {
    let now = chrono::Utc::now();
    let entry = paid_months::ActiveModel {
        id: Set(PaidLedgerId::new().into_inner()),
        user_id: Set(command.user_id.into_inner()),
        month_key: Set(command.month_key.to_string()),
        account_id: Set(command.account_id.map(AccountId::into_inner)),
        scope_key: Set(scope_key(command.account_id)),
        total_paid: Set(amount),
        paid_at: Set(today),
        created_at: Set(now),
        updated_at: Set(now),
    };

    paid_months::Entity::insert(entry)
        .on_conflict(
            OnConflict::columns([
                paid_months::Column::UserId,
                paid_months::Column::MonthKey,
                paid_months::Column::ScopeKey,
            ])
            .value(
                paid_months::Column::TotalPaid,
                Expr::col((paid_months::Entity, paid_months::Column::TotalPaid)).add(Expr::col((
                    Alias::new("excluded"),
                    paid_months::Column::TotalPaid,
                ))),
            )
            .update_columns([paid_months::Column::PaidAt, paid_months::Column::UpdatedAt])
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    Ok(())
}
