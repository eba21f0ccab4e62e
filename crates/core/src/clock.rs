//! Injected wall clock.
//!
//! Every operation that needs "today" takes a `&impl Clock` so tests can pin
//! the date with [`FixedClock`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// Source of the current instant and the current billing date.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current date in the billing time zone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock reporting dates in a fixed time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// Creates a clock reporting dates in `tz`.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a clock reporting UTC dates.
    #[must_use]
    pub const fn utc() -> Self {
        Self { tz: Tz::UTC }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Clock frozen at midnight UTC of a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Creates a clock frozen on `date`.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let clock = FixedClock::new(date);

        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().date_naive(), date);
    }

    #[test]
    fn test_system_clock_today_is_near_utc_today() {
        let clock = SystemClock::new(chrono_tz::America::Sao_Paulo);
        let utc_today = Utc::now().date_naive();

        let diff = (clock.today() - utc_today).num_days().abs();
        assert!(diff <= 1);
    }
}
