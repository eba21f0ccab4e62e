//! Property-based tests for the installment projector.
//!
//! - Span correctness: `projects_onto_month` agrees with the projected schedule.
//! - Idempotence: projecting the same records twice yields the same entries.
//! - Installment schedules yield exactly `total_installments` consecutive months.

use chrono::{TimeZone, Utc};
use fatura_shared::types::{TransactionId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::horizon::ProjectionHorizon;
use super::projector::InstallmentProjector;
use crate::billing::{BillingAccount, DueDay, MonthKey};
use crate::transaction::{Transaction, TransactionRecord, TransactionStatus, TransactionType};

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate credit records with optional due days.
fn credit_record() -> impl Strategy<Value = TransactionRecord> {
    (
        2020i32..2030,
        1u32..=12,
        1u32..=28,
        1u32..=48,
        any::<bool>(),
        proptest::option::of(1u32..=31),
        positive_amount(),
    )
        .prop_map(|(y, m, d, installments, recurring, due_day, amount)| {
            let created_at = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
            TransactionRecord {
                transaction: Transaction {
                    id: TransactionId::new(),
                    user_id: UserId::new(),
                    account_id: None,
                    category_id: None,
                    title: "Compra".to_string(),
                    description: None,
                    amount,
                    transaction_type: TransactionType::Credit,
                    status: TransactionStatus::Unpaid,
                    paid_date: None,
                    total_installments: if recurring { 1 } else { installments },
                    current_installment: 0,
                    is_recurring: recurring,
                    created_at,
                    updated_at: created_at,
                    deleted_at: None,
                },
                account: due_day.map(|d| BillingAccount {
                    id: fatura_shared::types::AccountId::new(),
                    bank_id: fatura_shared::types::BankId::new(),
                    bank_name: "Nubank".to_string(),
                    due_day: Some(DueDay::new(d).unwrap()),
                }),
                category: None,
            }
        })
}

fn horizon() -> ProjectionHorizon {
    ProjectionHorizon::until(MonthKey::new(2031, 12).unwrap())
}

proptest! {
    #[test]
    fn prop_span_matches_schedule(record in credit_record(), offset in -6i32..60) {
        let projector = InstallmentProjector::default();
        let target = projector.first_billing_month(&record).add_months(offset);

        let scheduled = projector
            .schedule(&record, horizon())
            .any(|entry| entry.month_key == target);

        if horizon().contains(target) {
            prop_assert_eq!(projector.projects_onto_month(&record, target), scheduled);
        }
    }

    #[test]
    fn prop_projection_is_idempotent(
        records in proptest::collection::vec(credit_record(), 0..8),
    ) {
        let projector = InstallmentProjector::default();

        let first: Vec<_> = projector
            .project_all_months(&records, horizon())
            .map(|e| (e.transaction().id, e.month_key, e.installment_index))
            .collect();
        let second: Vec<_> = projector
            .project_all_months(&records, horizon())
            .map(|e| (e.transaction().id, e.month_key, e.installment_index))
            .collect();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_installment_schedule_is_consecutive(record in credit_record()) {
        prop_assume!(!record.transaction.is_recurring);
        let projector = InstallmentProjector::default();

        let entries: Vec<_> = projector.schedule(&record, horizon()).collect();
        prop_assert_eq!(entries.len(), record.transaction.total_installments as usize);

        let first = projector.first_billing_month(&record);
        for (offset, entry) in entries.iter().enumerate() {
            let offset = i32::try_from(offset).unwrap();
            prop_assert_eq!(entry.month_key, first.add_months(offset));
            prop_assert_eq!(entry.installment_index, u32::try_from(offset).unwrap() + 1);
        }
    }

    #[test]
    fn prop_installment_number_matches_schedule(record in credit_record()) {
        prop_assume!(!record.transaction.is_single_installment());
        let projector = InstallmentProjector::default();

        for entry in projector.schedule(&record, horizon()) {
            prop_assert_eq!(
                projector.installment_number_for_month(&record, entry.month_key),
                Some(entry.installment_index)
            );
        }
    }
}
