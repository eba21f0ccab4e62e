//! Billing error types.

use thiserror::Error;

/// Billing calendar errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Month key is not of the form `YYYY-MM`.
    #[error("Invalid month key: {0} (expected YYYY-MM)")]
    InvalidMonthKey(String),

    /// Due day outside 1..=31.
    #[error("Due day must be between 1 and 31, got {0}")]
    InvalidDueDay(u32),

    /// Time zone name not found in the IANA database.
    #[error("Unknown billing time zone: {0}")]
    UnknownTimezone(String),
}
