//! Payment settlement: the "pay this month" state machine.
//!
//! The engine here is pure. It decides, for a month, which transactions are
//! charged, how each one advances and how much is attributed to the paid
//! ledger. Persisting a plan atomically is the job of the database layer.

pub mod engine;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::SettlementEngine;
pub use ledger::{LedgerScope, PaidLedgerEntry, PaidMonths, UNASSIGNED_SCOPE_KEY, scope_key};
pub use types::{
    InstallmentAdvance, PayMonthCommand, PayMonthOutcome, PaymentOutcome, SettlementPlan,
    SettlementStep,
};
