//! Account due days.

use fatura_shared::types::{AccountId, BankId};
use serde::{Deserialize, Serialize};

use super::error::BillingError;

/// Latest day of the month a purchase still lands on the current invoice.
///
/// Due days 29..=31 are clamped so every month has a cutoff.
pub const DUE_DAY_CUTOFF_CAP: u32 = 28;

/// Invoice due day of an account (1..=31).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DueDay(u8);

impl DueDay {
    /// Creates a due day.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidDueDay` outside 1..=31.
    pub fn new(day: u32) -> Result<Self, BillingError> {
        if !(1..=31).contains(&day) {
            return Err(BillingError::InvalidDueDay(day));
        }
        u8::try_from(day)
            .map(Self)
            .map_err(|_| BillingError::InvalidDueDay(day))
    }

    /// The configured day.
    #[must_use]
    pub fn day(self) -> u32 {
        u32::from(self.0)
    }

    /// Billing cutoff: `min(day, 28)`.
    #[must_use]
    pub fn cutoff(self) -> u32 {
        self.day().min(DUE_DAY_CUTOFF_CAP)
    }
}

impl TryFrom<u32> for DueDay {
    type Error = BillingError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<DueDay> for u32 {
    fn from(day: DueDay) -> Self {
        day.day()
    }
}

/// The billing-relevant view of a user's bank account link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAccount {
    /// Account ID.
    pub id: AccountId,
    /// Bank the account belongs to.
    pub bank_id: BankId,
    /// Bank display name.
    pub bank_name: String,
    /// Invoice due day, if configured.
    pub due_day: Option<DueDay>,
}
