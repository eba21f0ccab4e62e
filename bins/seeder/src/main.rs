//! Database seeder for Fatura development.
//!
//! Migrates the configured database and seeds a demo user with two accounts,
//! a few categories and six months of purchases. Months before the current
//! billing month are settled so the dashboard has history.
//!
//! Usage: cargo run --bin seeder

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use fatura_core::billing::{BillingAccount, MonthKey};
use fatura_core::notification::NullSink;
use fatura_core::settlement::PayMonthCommand;
use fatura_core::transaction::{CategoryRef, CreateTransactionInput, TransactionType};
use fatura_core::{BillingEngine, Clock, FixedClock};
use fatura_db::migration::{Migrator, MigratorTrait};
use fatura_db::{AccountRepository, BillingService, CatalogRepository, UserRepository};
use fatura_shared::types::{BankId, UserId};
use fatura_shared::{AppConfig, LoggingConfig};
use rust_decimal::Decimal;
use sea_orm_migration::sea_orm::DatabaseConnection;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_EMAIL: &str = "demo@fatura.local";

/// Months of history seeded before today.
const HISTORY_MONTHS: u32 = 6;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let db = fatura_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    Migrator::up(&db, None).await.context("Failed to migrate")?;

    let users = UserRepository::new(db.clone());
    if users.find_by_email(DEMO_EMAIL).await?.is_some() {
        info!(email = DEMO_EMAIL, "Demo user already seeded");
        return Ok(());
    }
    let user = users.create("Demo", DEMO_EMAIL).await?;
    let user_id = UserId::from_uuid(user.id);
    info!(user_id = %user_id, "Seeded demo user");

    let engine = BillingEngine::from_config(&config.billing)?;
    let (nubank, itau) = seed_accounts(&db, user_id).await?;
    let categories = seed_categories(&db, user_id).await?;

    let today = engine.system_clock().today();
    let start = today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(HISTORY_MONTHS)))
        .context("Start date out of range")?;

    let purchases = seed_purchases(&db, engine, user_id, start, &nubank, &itau, &categories).await?;
    info!(count = purchases, "Seeded purchases");

    settle_history(&db, engine, user_id, &[&nubank, &itau], today).await?;
    info!("Seeding complete");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn seed_accounts(
    db: &DatabaseConnection,
    user_id: UserId,
) -> anyhow::Result<(BillingAccount, BillingAccount)> {
    let catalog = CatalogRepository::new(db.clone());
    let accounts = AccountRepository::new(db.clone());

    let nubank = catalog.find_or_create_bank("Nubank").await?;
    let itau = catalog.find_or_create_bank("Itaú").await?;

    let nubank = accounts
        .create(user_id, BankId::from_uuid(nubank.id), Some(10))
        .await?;
    let itau = accounts
        .create(user_id, BankId::from_uuid(itau.id), Some(31))
        .await?;
    Ok((nubank, itau))
}

async fn seed_categories(
    db: &DatabaseConnection,
    user_id: UserId,
) -> anyhow::Result<Vec<CategoryRef>> {
    let catalog = CatalogRepository::new(db.clone());
    let mut categories = Vec::new();
    for name in ["Mercado", "Transporte", "Lazer", "Casa"] {
        categories.push(catalog.create_category(user_id, name).await?);
    }
    Ok(categories)
}

/// One month's purchases: a credit purchase in installments on each account,
/// a debit at the market and, in the first month, two subscriptions.
async fn seed_purchases(
    db: &DatabaseConnection,
    engine: BillingEngine,
    user_id: UserId,
    start: NaiveDate,
    nubank: &BillingAccount,
    itau: &BillingAccount,
    categories: &[CategoryRef],
) -> anyhow::Result<usize> {
    let category = |i: usize| categories.get(i % categories.len()).map(|c| c.id);
    let mut count = 0;

    for offset in 0..=HISTORY_MONTHS {
        let first = start
            .checked_add_months(Months::new(offset))
            .context("Date out of range")?;
        let day = |d: u32| first.with_day(d).map(noon).context("Invalid day");
        let service = service_on(db, engine, first);
        let i = usize::try_from(offset).unwrap_or_default();

        let inputs = [
            CreateTransactionInput {
                account_id: Some(nubank.id),
                category_id: category(i),
                total_installments: Some(3),
                created_at: Some(day(15)?),
                ..CreateTransactionInput::new(
                    format!("Compra parcelada {}", i + 1),
                    Decimal::new(36_000 + 1_500 * i64::from(offset), 2),
                    TransactionType::Credit,
                )
            },
            CreateTransactionInput {
                account_id: Some(itau.id),
                category_id: category(i + 1),
                created_at: Some(day(5)?),
                ..CreateTransactionInput::new(
                    "Posto de gasolina",
                    Decimal::new(18_990, 2),
                    TransactionType::Credit,
                )
            },
            CreateTransactionInput {
                category_id: category(0),
                created_at: Some(day(8)?),
                ..CreateTransactionInput::new(
                    "Feira",
                    Decimal::new(7_450, 2),
                    TransactionType::Debit,
                )
            },
        ];

        for input in inputs {
            service.create_transaction(user_id, input).await?;
            count += 1;
        }

        if offset == 0 {
            for (title, cents) in [("Streaming", 3_990), ("Academia", 9_900)] {
                let input = CreateTransactionInput {
                    account_id: Some(nubank.id),
                    category_id: category(2),
                    is_recurring: true,
                    created_at: Some(day(3)?),
                    ..CreateTransactionInput::new(title, Decimal::new(cents, 2), TransactionType::Credit)
                };
                service.create_transaction(user_id, input).await?;
                count += 1;
            }
        }
    }

    Ok(count)
}

/// Pays every billing month before the current one, per account.
async fn settle_history(
    db: &DatabaseConnection,
    engine: BillingEngine,
    user_id: UserId,
    accounts: &[&BillingAccount],
    today: NaiveDate,
) -> anyhow::Result<()> {
    let clock = FixedClock::new(today);
    for account in accounts {
        let current = engine
            .calendar()
            .resolve_current_billing_month_key(Some(*account), &clock);
        let mut month = MonthKey::from_date(today).add_months(-i32::try_from(HISTORY_MONTHS)?);

        while month < current {
            let payday = NaiveDate::from_ymd_opt(month.year(), month.month(), 20)
                .context("Invalid pay date")?;
            let outcome = service_on(db, engine, payday)
                .pay_month(PayMonthCommand {
                    user_id,
                    month_key: month,
                    account_id: Some(account.id),
                })
                .await?;
            info!(
                bank = %account.bank_name,
                month = %month,
                amount = %outcome.amount_paid,
                "Settled month"
            );
            month = month.next();
        }
    }
    Ok(())
}

fn service_on(
    db: &DatabaseConnection,
    engine: BillingEngine,
    date: NaiveDate,
) -> BillingService<FixedClock> {
    BillingService::with_clock(db.clone(), engine, FixedClock::new(date), Arc::new(NullSink))
}

fn noon(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN))
        .and_utc()
}
