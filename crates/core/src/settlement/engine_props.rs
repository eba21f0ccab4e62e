//! Property-based tests for the settlement engine.
//!
//! - Terminal state: paying each of a purchase's months once leaves it paid
//!   with `current_installment == total_installments`.
//! - Ledger monotonicity: attributed amounts are never negative, so running
//!   totals only grow.
//! - Progress: `current_installment` never decreases and never passes the total.
//! - Conservation: settling every installment attributes exactly the purchase
//!   amount, and so does summing its projected month entries.

use chrono::{NaiveDate, TimeZone, Utc};
use fatura_shared::types::{TransactionId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::SettlementEngine;
use super::ledger::PaidMonths;
use super::types::PayMonthCommand;
use crate::billing::MonthKey;
use crate::installment::{InstallmentProjector, ProjectionHorizon};
use crate::transaction::{Transaction, TransactionRecord, TransactionStatus, TransactionType};

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
}

fn purchase(user_id: UserId, amount: Decimal, total: u32, recurring: bool) -> TransactionRecord {
    let created_at = Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap();
    TransactionRecord::bare(Transaction {
        id: TransactionId::new(),
        user_id,
        account_id: None,
        category_id: None,
        title: "Compra".to_string(),
        description: None,
        amount,
        transaction_type: TransactionType::Credit,
        status: TransactionStatus::Unpaid,
        paid_date: None,
        total_installments: total,
        current_installment: 0,
        is_recurring: recurring,
        created_at,
        updated_at: created_at,
        deleted_at: None,
    })
}

proptest! {
    #[test]
    fn prop_paying_every_month_reaches_terminal_state(
        amount in positive_amount(),
        total in 1u32..=24,
    ) {
        let user = UserId::new();
        let mut records = vec![purchase(user, amount, total, false)];
        let engine = SettlementEngine::default();
        let months: Vec<_> = InstallmentProjector::default()
            .schedule(&records[0], ProjectionHorizon::until(MonthKey::new(2030, 12).unwrap()))
            .map(|e| e.month_key)
            .collect();

        let mut previous = 0;
        let mut attributed = Decimal::ZERO;
        for month in months {
            let command = PayMonthCommand { user_id: user, month_key: month, account_id: None };
            let plan = engine.plan(command, &records, today());
            prop_assert_eq!(plan.steps.len(), 1);
            attributed += plan.total_attributed();

            for (_, advance) in plan.advances() {
                SettlementEngine::apply_advance(&mut records[0].transaction, advance);
            }
            let current = records[0].transaction.current_installment;
            prop_assert!(current >= previous);
            prop_assert!(current <= total);
            previous = current;
        }

        let tx = &records[0].transaction;
        prop_assert_eq!(attributed, amount);
        prop_assert_eq!(tx.status, TransactionStatus::Paid);
        prop_assert_eq!(tx.paid_date, Some(today()));
        if total > 1 {
            prop_assert_eq!(tx.current_installment, total);
        }
    }

    #[test]
    fn prop_projected_entries_sum_to_amount(
        amount in positive_amount(),
        total in 1u32..=24,
    ) {
        let record = purchase(UserId::new(), amount, total, false);
        let entries: Vec<_> = InstallmentProjector::default()
            .schedule(&record, ProjectionHorizon::until(MonthKey::new(2024, 3).unwrap()))
            .collect();

        prop_assert_eq!(entries.len(), total as usize);
        let sum: Decimal = entries.iter().map(|e| e.amount()).sum();
        prop_assert_eq!(sum, amount);

        let max = entries.iter().map(|e| e.amount()).max().unwrap();
        let min = entries.iter().map(|e| e.amount()).min().unwrap();
        prop_assert!(max - min <= Decimal::new(1, 2));
    }

    #[test]
    fn prop_ledger_totals_only_grow(
        amounts in proptest::collection::vec(positive_amount(), 1..10),
        recurring in any::<bool>(),
        payments in 1usize..6,
    ) {
        let user = UserId::new();
        let records: Vec<_> = amounts
            .iter()
            .map(|amount| purchase(user, *amount, 1, recurring))
            .collect();
        let engine = SettlementEngine::default();
        let month = "2024-03".parse().unwrap();
        let mut ledger = PaidMonths::new();

        let mut previous = Decimal::ZERO;
        for _ in 0..payments {
            let command = PayMonthCommand { user_id: user, month_key: month, account_id: None };
            let plan = engine.plan(command, &records, today());
            prop_assert!(plan.total_attributed() >= Decimal::ZERO);
            if plan.touches_ledger() {
                ledger.record(month, plan.total_attributed());
            }
            prop_assert!(ledger.total_for(month) >= previous);
            previous = ledger.total_for(month);
        }
    }
}
