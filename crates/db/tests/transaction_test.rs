//! Integration tests for the transaction, account and catalog repositories.

mod common;

use common::{at, create_user, credit, date, setup};
use fatura_core::transaction::{
    CreateTransactionInput, InputError, TransactionStatus, TransactionType, UpdateTransactionInput,
};
use fatura_db::repositories::{AccountError, CatalogError, TransactionError};
use fatura_db::{AccountRepository, CatalogRepository, TransactionRepository};
use fatura_shared::types::{BankId, TransactionId};
use rust_decimal_macros::dec;

// ============================================================================
// Test: debit transactions are stored paid on the spot
// ============================================================================
#[tokio::test]
async fn test_create_debit_is_paid() {
    let env = setup().await;
    let repo = TransactionRepository::new(env.db.clone());

    let input = CreateTransactionInput {
        total_installments: Some(4),
        is_recurring: true,
        ..CreateTransactionInput::new("Padaria", dec!(12.50), TransactionType::Debit)
    };
    let tx = repo
        .create(env.user_id, input, at(2024, 5, 2), date(2024, 5, 2))
        .await
        .unwrap();

    let stored = repo.find(env.user_id, tx.id).await.unwrap().unwrap();
    assert_eq!(stored.status, TransactionStatus::Paid);
    assert_eq!(stored.total_installments, 1);
    assert_eq!(stored.current_installment, 1);
    assert!(!stored.is_recurring);
    assert_eq!(stored.paid_date, Some(date(2024, 5, 2)));
    assert_eq!(stored.amount, dec!(12.50));
}

// ============================================================================
// Test: invalid input is rejected before anything is stored
// ============================================================================
#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let env = setup().await;
    let repo = TransactionRepository::new(env.db.clone());

    let result = repo
        .create(
            env.user_id,
            credit("   ", dec!(10.00), 1, at(2024, 5, 2)),
            at(2024, 5, 2),
            date(2024, 5, 2),
        )
        .await;

    assert!(matches!(
        result,
        Err(TransactionError::Input(InputError::Validation(_)))
    ));
    assert!(repo.list_records(env.user_id, None).await.unwrap().is_empty());
}

// ============================================================================
// Test: referencing another user's account is rejected
// ============================================================================
#[tokio::test]
async fn test_create_rejects_foreign_account() {
    let env = setup().await;
    let other = create_user(&env.db, "joao@example.com").await;
    let repo = TransactionRepository::new(env.db.clone());

    let input = CreateTransactionInput {
        account_id: Some(env.account.id),
        ..credit("Tênis", dec!(200.00), 2, at(2024, 5, 2))
    };
    let result = repo
        .create(other, input, at(2024, 5, 2), date(2024, 5, 2))
        .await;

    assert!(matches!(result, Err(TransactionError::AccountNotFound(_))));
}

// ============================================================================
// Test: records carry the account's bank and due day and the category name
// ============================================================================
#[tokio::test]
async fn test_list_records_joins_account_and_category() {
    let env = setup().await;
    let repo = TransactionRepository::new(env.db.clone());

    let input = CreateTransactionInput {
        account_id: Some(env.account.id),
        category_id: Some(env.category.id),
        ..credit("Feira", dec!(90.00), 1, at(2024, 5, 2))
    };
    repo.create(env.user_id, input, at(2024, 5, 2), date(2024, 5, 2))
        .await
        .unwrap();

    let records = repo.list_records(env.user_id, None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].bank_name(), Some("Nubank"));
    assert_eq!(records[0].due_day().map(|d| d.day()), Some(10));
    assert_eq!(records[0].category_name(), Some("Mercado"));

    let other_account = repo
        .list_records(env.user_id, Some(fatura_shared::types::AccountId::new()))
        .await
        .unwrap();
    assert!(other_account.is_empty());
}

// ============================================================================
// Test: update patches fields and keeps the shape invariants
// ============================================================================
#[tokio::test]
async fn test_update_applies_patch() {
    let env = setup().await;
    let repo = TransactionRepository::new(env.db.clone());

    let tx = repo
        .create(
            env.user_id,
            credit("TV", dec!(1500.00), 10, at(2024, 5, 2)),
            at(2024, 5, 2),
            date(2024, 5, 2),
        )
        .await
        .unwrap();

    let patch = UpdateTransactionInput {
        title: Some("TV 55\"".to_string()),
        description: Some(Some("Sala".to_string())),
        current_installment: Some(25),
        ..UpdateTransactionInput::default()
    };
    let updated = repo
        .update(env.user_id, tx.id, patch, at(2024, 5, 3), date(2024, 5, 3))
        .await
        .unwrap();

    assert_eq!(updated.title, "TV 55\"");
    assert_eq!(updated.current_installment, 10);

    let stored = repo.find(env.user_id, tx.id).await.unwrap().unwrap();
    assert_eq!(stored.description.as_deref(), Some("Sala"));
    assert_eq!(stored.current_installment, 10);
    assert_eq!(stored.updated_at, at(2024, 5, 3));
}

// ============================================================================
// Test: remove hides a transaction, restore brings it back
// ============================================================================
#[tokio::test]
async fn test_remove_and_restore() {
    let env = setup().await;
    let repo = TransactionRepository::new(env.db.clone());

    let tx = repo
        .create(
            env.user_id,
            credit("Mesa", dec!(400.00), 2, at(2024, 5, 2)),
            at(2024, 5, 2),
            date(2024, 5, 2),
        )
        .await
        .unwrap();

    // Restoring a live transaction is a rule violation.
    let early = repo.restore(env.user_id, tx.id, at(2024, 5, 3)).await;
    assert!(matches!(
        early,
        Err(TransactionError::Input(InputError::NotRemoved))
    ));

    repo.remove(env.user_id, tx.id, at(2024, 5, 3)).await.unwrap();
    assert!(repo.list_records(env.user_id, None).await.unwrap().is_empty());
    assert_eq!(repo.list_removed(env.user_id).await.unwrap().len(), 1);

    let restored = repo.restore(env.user_id, tx.id, at(2024, 5, 4)).await.unwrap();
    assert!(!restored.is_deleted());
    assert_eq!(repo.list_records(env.user_id, None).await.unwrap().len(), 1);
}

// ============================================================================
// Test: missing transactions are reported as not found
// ============================================================================
#[tokio::test]
async fn test_update_missing_transaction() {
    let env = setup().await;
    let repo = TransactionRepository::new(env.db.clone());

    let result = repo
        .update(
            env.user_id,
            TransactionId::new(),
            UpdateTransactionInput::default(),
            at(2024, 5, 3),
            date(2024, 5, 3),
        )
        .await;

    assert!(matches!(result, Err(TransactionError::NotFound(_))));
}

// ============================================================================
// Test: accounts validate the due day and reject duplicates
// ============================================================================
#[tokio::test]
async fn test_account_due_day_and_duplicates() {
    let env = setup().await;
    let accounts = AccountRepository::new(env.db.clone());
    let catalog = CatalogRepository::new(env.db.clone());

    let nubank = BankId::from_uuid(catalog.find_or_create_bank("Nubank").await.unwrap().id);
    assert!(matches!(
        accounts.create(env.user_id, nubank, None).await,
        Err(AccountError::Duplicate(_))
    ));

    let inter = BankId::from_uuid(catalog.create_bank("Inter").await.unwrap().id);
    assert!(matches!(
        accounts.create(env.user_id, inter, Some(32)).await,
        Err(AccountError::InvalidDueDay(_))
    ));

    let account = accounts.create(env.user_id, inter, None).await.unwrap();
    assert!(account.due_day.is_none());

    let updated = accounts
        .set_due_day(env.user_id, account.id, Some(31))
        .await
        .unwrap();
    assert_eq!(updated.due_day.map(|d| d.cutoff()), Some(28));
    assert_eq!(updated.bank_name, "Inter");

    let names: Vec<String> = accounts
        .list(env.user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.bank_name)
        .collect();
    assert_eq!(names, ["Inter", "Nubank"]);
}

// ============================================================================
// Test: categories are unique per user
// ============================================================================
#[tokio::test]
async fn test_categories_unique_per_user() {
    let env = setup().await;
    let other = create_user(&env.db, "joao@example.com").await;
    let catalog = CatalogRepository::new(env.db.clone());

    assert!(matches!(
        catalog.create_category(env.user_id, "Mercado").await,
        Err(CatalogError::DuplicateCategory(_))
    ));
    assert!(catalog.create_category(other, "Mercado").await.is_ok());
    assert!(matches!(
        catalog.create_category(other, "  ").await,
        Err(CatalogError::BlankName)
    ));
    assert_eq!(catalog.list_categories(env.user_id).await.unwrap().len(), 1);
}
