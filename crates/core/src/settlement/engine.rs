//! Settlement engine.

use chrono::NaiveDate;

use super::types::{
    InstallmentAdvance, PayMonthCommand, PaymentOutcome, SettlementPlan, SettlementStep,
};
use crate::installment::InstallmentProjector;
use crate::transaction::{Transaction, TransactionRecord, TransactionStatus};

/// Plans month payments.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementEngine {
    projector: InstallmentProjector,
}

impl SettlementEngine {
    /// Creates an engine selecting candidates with `projector`.
    #[must_use]
    pub const fn new(projector: InstallmentProjector) -> Self {
        Self { projector }
    }

    /// Applies one month's payment to a transaction.
    ///
    /// The amount of the installment being settled is attributed.
    ///
    /// - Recurring: nothing changes.
    /// - Single installment: becomes paid today.
    /// - Installments: advances by one (never past the total) and becomes
    ///   paid when the last installment is reached.
    #[must_use]
    pub fn apply_payment(transaction: &Transaction, today: NaiveDate) -> PaymentOutcome {
        let attributed = transaction.next_installment_amount();

        if transaction.is_recurring {
            return PaymentOutcome {
                attributed,
                advance: None,
            };
        }

        let total = transaction.installments();
        let current_installment = if total <= 1 {
            transaction.current_installment
        } else {
            (transaction.current_installment + 1).min(total)
        };
        let completes = total <= 1 || current_installment >= total;

        let advance = if completes {
            InstallmentAdvance {
                current_installment,
                status: TransactionStatus::Paid,
                paid_date: Some(today),
            }
        } else {
            InstallmentAdvance {
                current_installment,
                status: transaction.status,
                paid_date: transaction.paid_date,
            }
        };

        PaymentOutcome {
            attributed,
            advance: Some(advance),
        }
    }

    /// Writes an advance into a transaction.
    pub fn apply_advance(transaction: &mut Transaction, advance: InstallmentAdvance) {
        transaction.current_installment = advance.current_installment;
        transaction.status = advance.status;
        transaction.paid_date = advance.paid_date;
    }

    /// True when the record is charged by `command`.
    #[must_use]
    pub fn is_candidate(&self, record: &TransactionRecord, command: &PayMonthCommand) -> bool {
        let tx = &record.transaction;
        tx.user_id == command.user_id
            && !tx.is_paid()
            && !tx.is_deleted()
            && command
                .account_id
                .is_none_or(|account_id| tx.account_id == Some(account_id))
            && self.projector.projects_onto_month(record, command.month_key)
    }

    /// Builds the settlement plan for `command` over `records`.
    pub fn plan<'a>(
        &self,
        command: PayMonthCommand,
        records: impl IntoIterator<Item = &'a TransactionRecord>,
        today: NaiveDate,
    ) -> SettlementPlan {
        let steps = records
            .into_iter()
            .filter(|record| self.is_candidate(record, &command))
            .map(|record| {
                let outcome = Self::apply_payment(&record.transaction, today);
                SettlementStep {
                    transaction_id: record.transaction.id,
                    attributed: outcome.attributed,
                    advance: outcome.advance,
                }
            })
            .collect();

        SettlementPlan { command, steps }
    }
}
