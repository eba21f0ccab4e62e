//! Shared setup for the integration tests: an in-memory SQLite database
//! migrated with the real schema and one seeded user.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fatura_core::billing::{BillingAccount, MonthKey};
use fatura_core::settlement::PayMonthCommand;
use fatura_core::transaction::{CategoryRef, CreateTransactionInput, TransactionType};
use fatura_db::migration::{Migrator, MigratorTrait};
use fatura_db::{AccountRepository, CatalogRepository, UserRepository};
use fatura_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub struct TestEnv {
    pub db: DatabaseConnection,
    pub user_id: UserId,
    /// "Nubank" account with due day 10.
    pub account: BillingAccount,
    /// "Mercado".
    pub category: CategoryRef,
}

/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

pub async fn create_user(db: &DatabaseConnection, email: &str) -> UserId {
    let user = UserRepository::new(db.clone())
        .create("Maria", email)
        .await
        .expect("Failed to create user");
    UserId::from_uuid(user.id)
}

pub async fn setup() -> TestEnv {
    let db = setup_db().await;
    let user_id = create_user(&db, "maria@example.com").await;

    let catalog = CatalogRepository::new(db.clone());
    let bank = catalog
        .find_or_create_bank("Nubank")
        .await
        .expect("Failed to create bank");
    let account = AccountRepository::new(db.clone())
        .create(user_id, fatura_shared::types::BankId::from_uuid(bank.id), Some(10))
        .await
        .expect("Failed to create account");
    let category = catalog
        .create_category(user_id, "Mercado")
        .await
        .expect("Failed to create category");

    TestEnv {
        db,
        user_id,
        account,
        category,
    }
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn month(key: &str) -> MonthKey {
    key.parse().unwrap()
}

/// Credit purchase on `created_at`, without account or category.
pub fn credit(
    title: &str,
    amount: Decimal,
    installments: u32,
    created_at: DateTime<Utc>,
) -> CreateTransactionInput {
    CreateTransactionInput {
        total_installments: Some(installments),
        created_at: Some(created_at),
        ..CreateTransactionInput::new(title, amount, TransactionType::Credit)
    }
}

pub fn recurring(title: &str, amount: Decimal, created_at: DateTime<Utc>) -> CreateTransactionInput {
    CreateTransactionInput {
        is_recurring: true,
        created_at: Some(created_at),
        ..CreateTransactionInput::new(title, amount, TransactionType::Credit)
    }
}

pub fn command(user_id: UserId, key: &str) -> PayMonthCommand {
    PayMonthCommand {
        user_id,
        month_key: month(key),
        account_id: None,
    }
}
