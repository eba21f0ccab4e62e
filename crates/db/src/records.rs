//! Row to domain mapping and the record loaders shared by the repositories.
//!
//! Loaders take any `ConnectionTrait` so they run inside a database
//! transaction as well as on the pool.

use std::collections::HashMap;

use fatura_core::billing::{BillingAccount, DueDay, MonthKey};
use fatura_core::settlement::PaidLedgerEntry;
use fatura_core::transaction::{CategoryRef, Transaction, TransactionRecord};
use fatura_shared::types::{
    AccountId, BankId, CategoryId, PaidLedgerId, TransactionId, UserId, to_money,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{accounts, banks, categories, paid_months, transactions};

/// Which transactions a loader returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RecordFilter {
    pub account_id: Option<AccountId>,
    pub include_deleted: bool,
    /// Take row locks on PostgreSQL (`SELECT ... FOR UPDATE`).
    pub lock: bool,
}

pub(crate) fn to_count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

pub(crate) fn from_count(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

pub(crate) fn transaction_from_model(model: transactions::Model) -> Transaction {
    Transaction {
        id: TransactionId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        account_id: model.account_id.map(AccountId::from_uuid),
        category_id: model.category_id.map(CategoryId::from_uuid),
        title: model.title,
        description: model.description,
        amount: to_money(model.amount),
        transaction_type: model.transaction_type.into(),
        status: model.status.into(),
        paid_date: model.paid_date,
        total_installments: to_count(model.total_installments),
        current_installment: to_count(model.current_installment),
        is_recurring: model.is_recurring,
        created_at: model.created_at,
        updated_at: model.updated_at,
        deleted_at: model.deleted_at,
    }
}

pub(crate) fn transaction_to_active(tx: &Transaction) -> transactions::ActiveModel {
    transactions::ActiveModel {
        id: Set(tx.id.into_inner()),
        user_id: Set(tx.user_id.into_inner()),
        account_id: Set(tx.account_id.map(AccountId::into_inner)),
        category_id: Set(tx.category_id.map(CategoryId::into_inner)),
        title: Set(tx.title.clone()),
        description: Set(tx.description.clone()),
        amount: Set(tx.amount),
        transaction_type: Set(tx.transaction_type.into()),
        status: Set(tx.status.into()),
        paid_date: Set(tx.paid_date),
        total_installments: Set(from_count(tx.total_installments)),
        current_installment: Set(from_count(tx.current_installment)),
        is_recurring: Set(tx.is_recurring),
        created_at: Set(tx.created_at),
        updated_at: Set(tx.updated_at),
        deleted_at: Set(tx.deleted_at),
    }
}

pub(crate) fn billing_account(account: &accounts::Model, bank: Option<&banks::Model>) -> BillingAccount {
    let due_day = account.due_day.and_then(|day| {
        let parsed = u32::try_from(day).ok().and_then(|d| DueDay::new(d).ok());
        if parsed.is_none() {
            tracing::warn!(account_id = %account.id, due_day = day, "ignoring invalid stored due day");
        }
        parsed
    });

    BillingAccount {
        id: AccountId::from_uuid(account.id),
        bank_id: BankId::from_uuid(account.bank_id),
        bank_name: bank.map(|b| b.name.clone()).unwrap_or_default(),
        due_day,
    }
}

pub(crate) fn ledger_entry(model: paid_months::Model) -> Result<PaidLedgerEntry, DbErr> {
    let month_key: MonthKey = model
        .month_key
        .parse()
        .map_err(|e: fatura_core::billing::BillingError| DbErr::Type(e.to_string()))?;

    Ok(PaidLedgerEntry {
        id: PaidLedgerId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        month_key,
        account_id: model.account_id.map(AccountId::from_uuid),
        total_paid: to_money(model.total_paid),
        paid_at: model.paid_at,
    })
}

/// The user's accounts keyed by id, with bank names.
pub(crate) async fn load_accounts<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
) -> Result<HashMap<AccountId, BillingAccount>, DbErr> {
    let rows = accounts::Entity::find()
        .filter(accounts::Column::UserId.eq(user_id.into_inner()))
        .find_also_related(banks::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .iter()
        .map(|(account, bank)| {
            let billing = billing_account(account, bank.as_ref());
            (billing.id, billing)
        })
        .collect())
}

/// The user's categories keyed by id.
pub(crate) async fn load_categories<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
) -> Result<HashMap<CategoryId, CategoryRef>, DbErr> {
    let rows = categories::Entity::find()
        .filter(categories::Column::UserId.eq(user_id.into_inner()))
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|c| {
            let id = CategoryId::from_uuid(c.id);
            (id, CategoryRef { id, name: c.name })
        })
        .collect())
}

/// The user's transactions joined in memory with their account and category.
///
/// Accounts and categories are read with separate queries so the lock, when
/// requested, applies to the transactions table only.
pub(crate) async fn load_records<C: ConnectionTrait>(
    conn: &C,
    user_id: UserId,
    filter: RecordFilter,
) -> Result<Vec<TransactionRecord>, DbErr> {
    let mut query = transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(user_id.into_inner()))
        .order_by_asc(transactions::Column::CreatedAt)
        .order_by_asc(transactions::Column::Id);

    if let Some(account_id) = filter.account_id {
        query = query.filter(transactions::Column::AccountId.eq(account_id.into_inner()));
    }
    if !filter.include_deleted {
        query = query.filter(transactions::Column::DeletedAt.is_null());
    }
    // SQLite has no row locks; its writers are serialized by the database lock.
    if filter.lock && conn.get_database_backend() == DbBackend::Postgres {
        query = query.lock_exclusive();
    }

    let rows = query.all(conn).await?;
    let accounts = load_accounts(conn, user_id).await?;
    let categories = load_categories(conn, user_id).await?;

    Ok(rows
        .into_iter()
        .map(|model| {
            let transaction = transaction_from_model(model);
            TransactionRecord {
                account: transaction
                    .account_id
                    .and_then(|id| accounts.get(&id).cloned()),
                category: transaction
                    .category_id
                    .and_then(|id| categories.get(&id).cloned()),
                transaction,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::{TransactionStatus, TransactionType};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn model() -> transactions::Model {
        let at = Utc.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap();
        transactions::Model {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            account_id: None,
            category_id: None,
            title: "Notebook".to_string(),
            description: None,
            amount: dec!(2999.9000001),
            transaction_type: TransactionType::Credit,
            status: TransactionStatus::Unpaid,
            paid_date: None,
            total_installments: 10,
            current_installment: 2,
            is_recurring: false,
            created_at: at,
            updated_at: at,
            deleted_at: None,
        }
    }

    #[test]
    fn test_transaction_from_model_rounds_amount() {
        let tx = transaction_from_model(model());
        assert_eq!(tx.amount, dec!(2999.90));
        assert_eq!(tx.total_installments, 10);
        assert_eq!(tx.current_installment, 2);
    }

    #[test]
    fn test_negative_counts_read_as_zero() {
        assert_eq!(to_count(-1), 0);
        assert_eq!(from_count(360), 360);
    }

    #[test]
    fn test_billing_account_drops_invalid_due_day() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let bank = banks::Model {
            id: Uuid::now_v7(),
            name: "Nubank".to_string(),
            created_at: at,
        };
        let mut account = accounts::Model {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            bank_id: bank.id,
            due_day: Some(10),
            created_at: at,
            updated_at: at,
        };

        let billing = billing_account(&account, Some(&bank));
        assert_eq!(billing.bank_name, "Nubank");
        assert_eq!(billing.due_day.map(DueDay::day), Some(10));

        account.due_day = Some(45);
        assert!(billing_account(&account, Some(&bank)).due_day.is_none());
    }
}
