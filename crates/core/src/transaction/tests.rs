//! Tests for transaction rules and inputs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fatura_shared::types::UserId;
use rust_decimal_macros::dec;

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 15, 10, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
}

fn credit(title: &str, installments: u32) -> CreateTransactionInput {
    let mut input = CreateTransactionInput::new(title, dec!(300.00), TransactionType::Credit);
    input.total_installments = Some(installments);
    input
}

#[test]
fn test_create_credit_starts_at_installment_zero() {
    let mut input = credit("Notebook", 3);
    input.current_installment = Some(2);

    let tx = TransactionRules::build_new(UserId::new(), input, now(), today()).unwrap();

    assert_eq!(tx.total_installments, 3);
    assert_eq!(tx.current_installment, 0);
    assert_eq!(tx.status, TransactionStatus::Unpaid);
    assert_eq!(tx.created_at, now());
    assert!(tx.paid_date.is_none());
}

#[test]
fn test_create_debit_is_paid_immediately() {
    let mut input = CreateTransactionInput::new("Mercado", dec!(80.00), TransactionType::Debit);
    input.total_installments = Some(5);
    input.is_recurring = true;
    input.status = Some(TransactionStatus::Unpaid);

    let tx = TransactionRules::build_new(UserId::new(), input, now(), today()).unwrap();

    assert_eq!(tx.status, TransactionStatus::Paid);
    assert_eq!(tx.paid_date, Some(today()));
    assert_eq!(tx.total_installments, 1);
    assert_eq!(tx.current_installment, 1);
    assert!(!tx.is_recurring);
}

#[test]
fn test_create_recurring_forces_single_installment() {
    let mut input = credit("Streaming", 12);
    input.is_recurring = true;

    let tx = TransactionRules::build_new(UserId::new(), input, now(), today()).unwrap();

    assert_eq!(tx.total_installments, 1);
    assert_eq!(tx.current_installment, 0);
    assert!(tx.is_recurring);
}

#[test]
fn test_create_keeps_backdated_timestamp() {
    let purchase = Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap();
    let mut input = credit("Geladeira", 10);
    input.created_at = Some(purchase);

    let tx = TransactionRules::build_new(UserId::new(), input, now(), today()).unwrap();

    assert_eq!(tx.created_at, purchase);
    assert_eq!(tx.updated_at, now());
}

#[test]
fn test_create_rejects_invalid_fields() {
    let mut input = CreateTransactionInput::new("", dec!(-1.00), TransactionType::Credit);
    input.total_installments = Some(0);

    let Err(InputError::Validation(errors)) =
        TransactionRules::build_new(UserId::new(), input, now(), today())
    else {
        panic!("expected validation failure");
    };

    let fields = errors.field_errors();
    assert!(fields.contains_key("title"));
    assert!(fields.contains_key("amount"));
    assert!(fields.contains_key("total_installments"));
}

#[test]
fn test_create_rejects_blank_title_and_sub_cent_amount() {
    let input = CreateTransactionInput::new("   ", dec!(10.005), TransactionType::Credit);

    let Err(InputError::Validation(errors)) =
        TransactionRules::build_new(UserId::new(), input, now(), today())
    else {
        panic!("expected validation failure");
    };

    let fields = errors.field_errors();
    assert!(fields.contains_key("title"));
    assert!(fields.contains_key("amount"));
}

#[test]
fn test_create_rejects_too_many_installments() {
    let input = credit("Casa", MAX_INSTALLMENTS + 1);
    assert!(TransactionRules::build_new(UserId::new(), input, now(), today()).is_err());
}

#[test]
fn test_update_recurring_clears_paid_date() {
    let mut tx = TransactionRules::build_new(UserId::new(), credit("Academia", 1), now(), today())
        .unwrap();
    tx.paid_date = Some(today());

    let patch = UpdateTransactionInput {
        is_recurring: Some(true),
        total_installments: Some(6),
        current_installment: Some(3),
        ..Default::default()
    };
    let updated = TransactionRules::apply_update(&tx, patch, now(), today()).unwrap();

    assert!(updated.is_recurring);
    assert_eq!(updated.total_installments, 1);
    assert_eq!(updated.current_installment, 0);
    assert!(updated.paid_date.is_none());
}

#[test]
fn test_update_clamps_current_installment() {
    let tx = TransactionRules::build_new(UserId::new(), credit("Sofá", 10), now(), today()).unwrap();

    let patch = UpdateTransactionInput {
        total_installments: Some(4),
        current_installment: Some(9),
        ..Default::default()
    };
    let updated = TransactionRules::apply_update(&tx, patch, now(), today()).unwrap();

    assert_eq!(updated.total_installments, 4);
    assert_eq!(updated.current_installment, 4);
}

#[test]
fn test_update_reapplies_debit_normalization() {
    let input = CreateTransactionInput::new("Padaria", dec!(12.00), TransactionType::Debit);
    let tx = TransactionRules::build_new(UserId::new(), input, now(), today()).unwrap();

    let patch = UpdateTransactionInput {
        status: Some(TransactionStatus::Unpaid),
        total_installments: Some(3),
        ..Default::default()
    };
    let updated = TransactionRules::apply_update(&tx, patch, now(), today()).unwrap();

    assert_eq!(updated.status, TransactionStatus::Paid);
    assert_eq!(updated.total_installments, 1);
    assert_eq!(updated.current_installment, 1);
    assert_eq!(updated.paid_date, Some(today()));
}

#[test]
fn test_update_clears_nullable_fields() {
    let mut input = credit("Viagem", 2);
    input.description = Some("Férias".to_string());
    let tx = TransactionRules::build_new(UserId::new(), input, now(), today()).unwrap();

    let patch = UpdateTransactionInput {
        description: Some(None),
        title: Some("Viagem Rio".to_string()),
        ..Default::default()
    };
    let updated = TransactionRules::apply_update(&tx, patch, now(), today()).unwrap();

    assert!(updated.description.is_none());
    assert_eq!(updated.title, "Viagem Rio");
    assert_eq!(updated.amount, tx.amount);
}

#[test]
fn test_remove_and_restore() {
    let tx = TransactionRules::build_new(UserId::new(), credit("TV", 5), now(), today()).unwrap();

    assert!(matches!(
        TransactionRules::restore(&tx, now()),
        Err(InputError::NotRemoved)
    ));

    let removed = TransactionRules::remove(&tx, now());
    assert!(removed.is_deleted());

    let restored = TransactionRules::restore(&removed, now()).unwrap();
    assert!(!restored.is_deleted());
}

#[test]
fn test_installment_amount_spreads_leftover_cents() {
    let mut tx = TransactionRules::build_new(UserId::new(), credit("Celular", 3), now(), today())
        .unwrap();
    tx.amount = dec!(100.00);
    assert_eq!(tx.installment_amount(1), dec!(33.34));
    assert_eq!(tx.installment_amount(2), dec!(33.33));
    assert_eq!(tx.installment_amount(3), dec!(33.33));
    assert_eq!(tx.next_installment_amount(), dec!(33.34));

    tx.current_installment = 2;
    assert_eq!(tx.next_installment_amount(), dec!(33.33));

    tx.total_installments = 0;
    assert_eq!(tx.installment_amount(1), dec!(100.00));
}

#[test]
fn test_enum_names_parse() {
    assert_eq!("credit".parse::<TransactionType>().unwrap(), TransactionType::Credit);
    assert_eq!(" DEBIT ".parse::<TransactionType>().unwrap(), TransactionType::Debit);
    assert_eq!("overdue".parse::<TransactionStatus>().unwrap(), TransactionStatus::Overdue);
    assert!(matches!(
        "pix".parse::<TransactionType>(),
        Err(InputError::UnknownType(_))
    ));
    assert_eq!(TransactionStatus::Paid.to_string(), "paid");
}
