//! Billing façade.
//!
//! [`BillingService`] is the one entry point callers use: it reads the clock,
//! runs the repositories, emits notifications and maps every failure into
//! [`AppError`].

use std::sync::Arc;

use fatura_core::billing::BillingAccount;
use fatura_core::dashboard::{DashboardQuery, DashboardService, DashboardStats, MonthlyOverview};
use fatura_core::export::{ExportFilter, ExportRow, ExportService};
use fatura_core::import::ImportRow;
use fatura_core::notification::{BillingEvent, NotificationSink};
use fatura_core::settlement::{PayMonthCommand, PayMonthOutcome};
use fatura_core::transaction::{CreateTransactionInput, Transaction, UpdateTransactionInput};
use fatura_core::{BillingEngine, Clock, SystemClock};
use fatura_shared::types::{AccountId, TransactionId, UserId};
use fatura_shared::{AppError, AppResult};
use sea_orm::DatabaseConnection;
use tracing::{error, info};

use crate::repositories::{
    AccountRepository, DbNotificationSink, ImportRepository, PaidLedgerRepository,
    SettlementRepository, TransactionRepository,
};

/// Billing operations for one user at a time.
#[derive(Clone)]
pub struct BillingService<C: Clock = SystemClock> {
    engine: BillingEngine,
    clock: C,
    sink: Arc<dyn NotificationSink>,
    accounts: AccountRepository,
    transactions: TransactionRepository,
    ledger: PaidLedgerRepository,
    settlement: SettlementRepository,
    imports: ImportRepository,
}

impl BillingService<SystemClock> {
    /// Service on the system clock, storing notifications in the database.
    #[must_use]
    pub fn new(db: DatabaseConnection, engine: BillingEngine) -> Self {
        let sink = Arc::new(DbNotificationSink::new(db.clone()));
        Self::with_clock(db, engine, engine.system_clock(), sink)
    }
}

impl<C: Clock> BillingService<C> {
    /// Service with an explicit clock and sink.
    #[must_use]
    pub fn with_clock(
        db: DatabaseConnection,
        engine: BillingEngine,
        clock: C,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            engine,
            clock,
            sink,
            accounts: AccountRepository::new(db.clone()),
            transactions: TransactionRepository::new(db.clone()),
            ledger: PaidLedgerRepository::new(db.clone()),
            settlement: SettlementRepository::new(db.clone()),
            imports: ImportRepository::new(db),
        }
    }

    /// Engine in use.
    #[must_use]
    pub const fn engine(&self) -> &BillingEngine {
        &self.engine
    }

    /// Creates a transaction.
    pub async fn create_transaction(
        &self,
        user_id: UserId,
        input: CreateTransactionInput,
    ) -> AppResult<Transaction> {
        let result = self
            .transactions
            .create(user_id, input, self.clock.now(), self.clock.today())
            .await;

        match result {
            Ok(tx) => {
                info!(user_id = %user_id, transaction_id = %tx.id, "Transaction created");
                self.emit(user_id, BillingEvent::TransactionCreated { title: tx.title.clone() });
                Ok(tx)
            }
            Err(e) => Err(self.fail(user_id, "create transaction", e.into())),
        }
    }

    /// Applies a patch to a transaction.
    pub async fn update_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
        patch: UpdateTransactionInput,
    ) -> AppResult<Transaction> {
        let result = self
            .transactions
            .update(user_id, id, patch, self.clock.now(), self.clock.today())
            .await;

        match result {
            Ok(tx) => {
                info!(user_id = %user_id, transaction_id = %id, "Transaction updated");
                self.emit(user_id, BillingEvent::TransactionUpdated { title: tx.title.clone() });
                Ok(tx)
            }
            Err(e) => Err(self.fail(user_id, "update transaction", e.into())),
        }
    }

    /// Soft-deletes a transaction.
    pub async fn remove_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> AppResult<Transaction> {
        match self.transactions.remove(user_id, id, self.clock.now()).await {
            Ok(tx) => {
                info!(user_id = %user_id, transaction_id = %id, "Transaction removed");
                self.emit(user_id, BillingEvent::TransactionRemoved { title: tx.title.clone() });
                Ok(tx)
            }
            Err(e) => Err(self.fail(user_id, "remove transaction", e.into())),
        }
    }

    /// Restores a soft-deleted transaction.
    pub async fn restore_transaction(
        &self,
        user_id: UserId,
        id: TransactionId,
    ) -> AppResult<Transaction> {
        match self.transactions.restore(user_id, id, self.clock.now()).await {
            Ok(tx) => {
                info!(user_id = %user_id, transaction_id = %id, "Transaction restored");
                self.emit(user_id, BillingEvent::TransactionRestored { title: tx.title.clone() });
                Ok(tx)
            }
            Err(e) => Err(self.fail(user_id, "restore transaction", e.into())),
        }
    }

    /// Pays a billing month. A month with nothing due succeeds with a zero
    /// amount and emits nothing.
    pub async fn pay_month(&self, command: PayMonthCommand) -> AppResult<PayMonthOutcome> {
        let result = self
            .settlement
            .pay_month(&self.engine, command, self.clock.today())
            .await;

        match result {
            Ok(outcome) => {
                if !outcome.is_nothing_to_pay() {
                    self.emit(
                        command.user_id,
                        BillingEvent::PaymentsRegistered {
                            month_key: outcome.month_key,
                            amount: outcome.amount_paid,
                        },
                    );
                }
                Ok(outcome)
            }
            Err(e) => Err(self.fail(command.user_id, "pay month", e.into())),
        }
    }

    /// Imports a batch of rows, all or nothing.
    pub async fn import(&self, user_id: UserId, rows: &[ImportRow]) -> AppResult<Vec<Transaction>> {
        let result = self
            .imports
            .import(user_id, rows, self.clock.now(), self.clock.today())
            .await;

        match result {
            Ok(imported) => {
                self.emit(
                    user_id,
                    BillingEvent::ImportCompleted {
                        count: imported.len(),
                    },
                );
                Ok(imported)
            }
            Err(e) => {
                let app: AppError = e.into();
                error!(user_id = %user_id, error = %app, "Import rejected");
                self.emit(
                    user_id,
                    BillingEvent::ImportFailed {
                        reason: app.to_string(),
                    },
                );
                Err(app)
            }
        }
    }

    /// Credit invoices per month with the month to act on.
    pub async fn monthly_overview(
        &self,
        user_id: UserId,
        query: DashboardQuery,
    ) -> AppResult<MonthlyOverview> {
        let account = self.account(user_id, query.account_id).await?;
        let records = self
            .transactions
            .list_records(user_id, query.account_id)
            .await?;
        let paid = self
            .ledger
            .paid_months(user_id, query.ledger_scope)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(DashboardService::monthly_overview(
            &self.engine,
            &records,
            &paid,
            &query,
            account.as_ref(),
            &self.clock,
        ))
    }

    /// Dashboard header statistics.
    pub async fn stats(&self, user_id: UserId, query: DashboardQuery) -> AppResult<DashboardStats> {
        let account = self.account(user_id, query.account_id).await?;
        let records = self
            .transactions
            .list_records(user_id, query.account_id)
            .await?;
        let paid = self
            .ledger
            .paid_months(user_id, query.ledger_scope)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(DashboardService::stats(
            &self.engine,
            &records,
            &paid,
            &query,
            account.as_ref(),
            &self.clock,
        ))
    }

    /// Flat export rows, newest first.
    pub async fn export(&self, user_id: UserId, filter: ExportFilter) -> AppResult<Vec<ExportRow>> {
        let records = self
            .transactions
            .list_records(user_id, filter.account_id)
            .await?;
        Ok(ExportService::rows(self.engine.calendar(), &records, &filter))
    }

    async fn account(
        &self,
        user_id: UserId,
        account_id: Option<AccountId>,
    ) -> AppResult<Option<BillingAccount>> {
        let Some(account_id) = account_id else {
            return Ok(None);
        };
        match self.accounts.find(user_id, account_id).await? {
            Some(account) => Ok(Some(account)),
            None => Err(AppError::NotFound(format!("Account not found: {account_id}"))),
        }
    }

    fn emit(&self, user_id: UserId, event: BillingEvent) {
        self.sink.emit(user_id, event);
    }

    /// Logs a failure and, for server-side failures, tells the user.
    fn fail(&self, user_id: UserId, operation: &'static str, error: AppError) -> AppError {
        error!(user_id = %user_id, operation, error = %error, "Billing operation failed");
        if error.is_server_error() {
            self.emit(user_id, BillingEvent::OperationFailed { operation });
        }
        error
    }
}
