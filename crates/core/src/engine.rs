//! Billing engine wiring.

use chrono::NaiveDate;
use fatura_shared::BillingConfig;

use crate::aggregation::{MonthAggregator, MonthGroup, MonthOrder};
use crate::billing::{BillingCalendar, BillingError};
use crate::clock::SystemClock;
use crate::installment::{InstallmentProjector, ProjectionHorizon};
use crate::settlement::{PaidMonths, SettlementEngine};
use crate::transaction::TransactionRecord;

/// Default number of months recurring transactions are projected ahead.
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// The calendar, projector, aggregator and settlement engine built from one
/// `billing` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingEngine {
    calendar: BillingCalendar,
    horizon_months: u32,
}

impl Default for BillingEngine {
    fn default() -> Self {
        Self::new(BillingCalendar::utc(), DEFAULT_HORIZON_MONTHS)
    }
}

impl BillingEngine {
    /// Creates an engine.
    #[must_use]
    pub const fn new(calendar: BillingCalendar, horizon_months: u32) -> Self {
        Self {
            calendar,
            horizon_months,
        }
    }

    /// Builds the engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::UnknownTimezone` if the configured zone is unknown.
    pub fn from_config(config: &BillingConfig) -> Result<Self, BillingError> {
        Ok(Self::new(
            BillingCalendar::from_config(config)?,
            config.projection_horizon_months,
        ))
    }

    /// Billing calendar.
    #[must_use]
    pub const fn calendar(&self) -> &BillingCalendar {
        &self.calendar
    }

    /// Months projected past the current one.
    #[must_use]
    pub const fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    /// Wall clock in the billing time zone.
    #[must_use]
    pub const fn system_clock(&self) -> SystemClock {
        SystemClock::new(self.calendar.timezone())
    }

    /// Installment projector.
    #[must_use]
    pub const fn projector(&self) -> InstallmentProjector {
        InstallmentProjector::new(self.calendar)
    }

    /// Month aggregator.
    #[must_use]
    pub const fn aggregator(&self) -> MonthAggregator {
        MonthAggregator::new(self.projector())
    }

    /// Settlement engine.
    #[must_use]
    pub const fn settlement(&self) -> SettlementEngine {
        SettlementEngine::new(self.projector())
    }

    /// Projection horizon as seen on `today`.
    #[must_use]
    pub fn horizon(&self, today: NaiveDate) -> ProjectionHorizon {
        ProjectionHorizon::from_today(today, self.horizon_months)
    }

    /// Projects `records` and groups them per billing month.
    pub fn group_months<'a, I>(
        &self,
        records: I,
        paid: &PaidMonths,
        order: MonthOrder,
        today: NaiveDate,
    ) -> Vec<MonthGroup>
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
        I::IntoIter: 'a,
    {
        let entries = self
            .projector()
            .project_all_months(records, self.horizon(today));
        self.aggregator().group_by_month(entries, paid, order)
    }
}
