//! Transactions: domain types, validated inputs and mutation invariants.

pub mod error;
pub mod input;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::InputError;
pub use input::{CreateTransactionInput, MAX_INSTALLMENTS, UpdateTransactionInput};
pub use rules::TransactionRules;
pub use types::{CategoryRef, Transaction, TransactionRecord, TransactionStatus, TransactionType};
