//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - [`BillingService`], the façade wiring repositories to the billing engine

pub mod billing;
pub mod entities;
pub mod errors;
pub mod migration;
mod records;
pub mod repositories;

pub use billing::BillingService;
pub use repositories::{
    AccountRepository, CatalogRepository, DbNotificationSink, ImportRepository,
    NotificationRepository, PaidLedgerRepository, SettlementRepository, TransactionRepository,
    UserRepository,
};

use std::time::Duration;

use fatura_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    tracing::debug!(max = config.max_connections, "connecting to database");
    Database::connect(options).await
}
