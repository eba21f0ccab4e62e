//! Projection horizon.

use chrono::NaiveDate;

use crate::billing::MonthKey;

/// Longest supported horizon (100 years).
pub const MAX_HORIZON_MONTHS: u32 = 1200;

/// Last month (inclusive) recurring transactions are projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionHorizon {
    last_month: MonthKey,
}

impl ProjectionHorizon {
    /// Horizon ending `months` months after the month of `today`.
    #[must_use]
    pub fn from_today(today: NaiveDate, months: u32) -> Self {
        let months = i32::try_from(months.min(MAX_HORIZON_MONTHS)).unwrap_or_default();
        Self {
            last_month: MonthKey::from_date(today).add_months(months),
        }
    }

    /// Horizon ending at `last_month`.
    #[must_use]
    pub const fn until(last_month: MonthKey) -> Self {
        Self { last_month }
    }

    /// Last included month.
    #[must_use]
    pub const fn last_month(self) -> MonthKey {
        self.last_month
    }

    /// True when `month` is at or before the horizon.
    #[must_use]
    pub fn contains(self, month: MonthKey) -> bool {
        month <= self.last_month
    }
}
