//! Settlement types.

use chrono::NaiveDate;
use fatura_shared::types::{AccountId, TransactionId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::MonthKey;
use crate::transaction::TransactionStatus;

/// Request to pay every installment charged in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayMonthCommand {
    /// Paying user.
    pub user_id: UserId,
    /// Month being paid.
    pub month_key: MonthKey,
    /// Restricts the payment to one account.
    pub account_id: Option<AccountId>,
}

/// New installment state of a transaction after a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentAdvance {
    /// Installments paid after this payment.
    pub current_installment: u32,
    /// Status after this payment.
    pub status: TransactionStatus,
    /// Paid date after this payment.
    pub paid_date: Option<NaiveDate>,
}

impl InstallmentAdvance {
    /// True when this payment finished the transaction.
    #[must_use]
    pub fn completes(&self) -> bool {
        self.status == TransactionStatus::Paid
    }
}

/// Result of applying one payment to one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentOutcome {
    /// Amount attributed to the paid ledger.
    pub attributed: Decimal,
    /// State change to persist. `None` for recurring transactions.
    pub advance: Option<InstallmentAdvance>,
}

/// One transaction's share of a month payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementStep {
    /// Charged transaction.
    pub transaction_id: TransactionId,
    /// Amount attributed.
    pub attributed: Decimal,
    /// State change to persist.
    pub advance: Option<InstallmentAdvance>,
}

/// Everything a month payment changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// The request being settled.
    pub command: PayMonthCommand,
    /// Per-transaction changes, in candidate order.
    pub steps: Vec<SettlementStep>,
}

impl SettlementPlan {
    /// True when no transaction is charged in the month.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of the attributed amounts.
    #[must_use]
    pub fn total_attributed(&self) -> Decimal {
        self.steps.iter().map(|s| s.attributed).sum()
    }

    /// True when the ledger must be updated.
    #[must_use]
    pub fn touches_ledger(&self) -> bool {
        self.total_attributed() > Decimal::ZERO
    }

    /// Steps that mutate their transaction.
    pub fn advances(&self) -> impl Iterator<Item = (TransactionId, InstallmentAdvance)> + '_ {
        self.steps
            .iter()
            .filter_map(|s| s.advance.map(|a| (s.transaction_id, a)))
    }

    /// Summary returned to the caller.
    #[must_use]
    pub fn outcome(&self) -> PayMonthOutcome {
        PayMonthOutcome {
            month_key: self.command.month_key,
            account_id: self.command.account_id,
            amount_paid: self.total_attributed(),
            transactions_advanced: self.advances().count(),
            transactions_completed: self.advances().filter(|(_, a)| a.completes()).count(),
            charged: self.steps.len(),
        }
    }
}

/// Summary of a month payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayMonthOutcome {
    /// Paid month.
    pub month_key: MonthKey,
    /// Account filter of the payment.
    pub account_id: Option<AccountId>,
    /// Amount added to the paid ledger.
    pub amount_paid: Decimal,
    /// Transactions whose installment state changed.
    pub transactions_advanced: usize,
    /// Transactions that became fully paid.
    pub transactions_completed: usize,
    /// Transactions charged in the month, recurring ones included.
    pub charged: usize,
}

impl PayMonthOutcome {
    /// True when there was nothing to pay.
    #[must_use]
    pub const fn is_nothing_to_pay(&self) -> bool {
        self.charged == 0
    }
}
