//! Transaction input errors.

use thiserror::Error;
use validator::ValidationErrors;

/// Errors raised while validating or mutating a transaction.
#[derive(Debug, Error)]
pub enum InputError {
    /// Field-level validation failure.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Unknown transaction type name.
    #[error("Unknown transaction type: {0}")]
    UnknownType(String),

    /// Unknown transaction status name.
    #[error("Unknown transaction status: {0}")]
    UnknownStatus(String),

    /// Restore requested for a transaction that is not removed.
    #[error("Transaction is not removed")]
    NotRemoved,
}
