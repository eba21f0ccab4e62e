//! Billing calendar resolver.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use fatura_shared::BillingConfig;

use super::account::{BillingAccount, DueDay};
use super::error::BillingError;
use super::month::MonthKey;
use crate::clock::Clock;
use crate::transaction::Transaction;

/// Maps timestamps onto billing months using an account's due day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingCalendar {
    tz: Tz,
}

impl Default for BillingCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl BillingCalendar {
    /// Creates a calendar taking dates in `tz`.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Creates a calendar taking dates in UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Builds the calendar from the `billing` config section.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::UnknownTimezone` for names outside the IANA database.
    pub fn from_config(config: &BillingConfig) -> Result<Self, BillingError> {
        config
            .timezone
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|_| BillingError::UnknownTimezone(config.timezone.clone()))
    }

    /// Time zone used to take dates.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Calendar date of `at` in the billing time zone.
    #[must_use]
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// Billing month for a purchase made on `date`.
    ///
    /// Without a due day the purchase month is the billing month. Otherwise
    /// purchases after the cutoff roll into the next month.
    #[must_use]
    pub fn month_for_date(date: NaiveDate, due_day: Option<DueDay>) -> MonthKey {
        let month = MonthKey::from_date(date);
        match due_day {
            Some(due_day) if date.day() > due_day.cutoff() => month.next(),
            _ => month,
        }
    }

    /// First billing month of a transaction.
    #[must_use]
    pub fn resolve_billing_month_key(
        &self,
        transaction: &Transaction,
        account: Option<&BillingAccount>,
    ) -> MonthKey {
        Self::month_for_date(
            self.local_date(transaction.created_at),
            account.and_then(|a| a.due_day),
        )
    }

    /// Billing month a purchase made today would land in.
    #[must_use]
    pub fn resolve_current_billing_month_key(
        &self,
        account: Option<&BillingAccount>,
        clock: &impl Clock,
    ) -> MonthKey {
        Self::month_for_date(clock.today(), account.and_then(|a| a.due_day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;
    use fatura_shared::types::{AccountId, BankId};
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account(due_day: Option<u32>) -> BillingAccount {
        BillingAccount {
            id: AccountId::new(),
            bank_id: BankId::new(),
            bank_name: "Nubank".to_string(),
            due_day: due_day.map(|d| DueDay::new(d).unwrap()),
        }
    }

    #[rstest]
    #[case(date(2024, 4, 10), Some(10), "2024-04")]
    #[case(date(2024, 4, 11), Some(10), "2024-05")]
    #[case(date(2024, 4, 1), Some(1), "2024-04")]
    #[case(date(2024, 4, 2), Some(1), "2024-05")]
    #[case(date(2024, 12, 20), Some(15), "2025-01")]
    #[case(date(2024, 1, 28), Some(31), "2024-01")]
    #[case(date(2024, 1, 29), Some(31), "2024-02")]
    #[case(date(2024, 1, 31), None, "2024-01")]
    fn test_month_for_date(
        #[case] purchase: NaiveDate,
        #[case] due_day: Option<u32>,
        #[case] expected: &str,
    ) {
        let due_day = due_day.map(|d| DueDay::new(d).unwrap());
        assert_eq!(
            BillingCalendar::month_for_date(purchase, due_day).to_string(),
            expected
        );
    }

    #[test]
    fn test_current_billing_month_uses_clock() {
        let calendar = BillingCalendar::utc();
        let clock = FixedClock::new(date(2024, 4, 15));

        assert_eq!(
            calendar
                .resolve_current_billing_month_key(Some(&account(Some(10))), &clock)
                .to_string(),
            "2024-05"
        );
        assert_eq!(
            calendar
                .resolve_current_billing_month_key(None, &clock)
                .to_string(),
            "2024-04"
        );
        assert_eq!(
            calendar
                .resolve_current_billing_month_key(Some(&account(None)), &clock)
                .to_string(),
            "2024-04"
        );
    }

    #[test]
    fn test_local_date_respects_configured_zone() {
        // 01:30 UTC on May 1st is still April 30th in São Paulo.
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 1, 30, 0).unwrap();

        assert_eq!(BillingCalendar::utc().local_date(at), date(2024, 5, 1));
        assert_eq!(
            BillingCalendar::new(chrono_tz::America::Sao_Paulo).local_date(at),
            date(2024, 4, 30)
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = BillingConfig::default();
        assert_eq!(
            BillingCalendar::from_config(&config).unwrap().timezone(),
            Tz::UTC
        );

        config.timezone = "America/Sao_Paulo".to_string();
        assert_eq!(
            BillingCalendar::from_config(&config).unwrap().timezone(),
            chrono_tz::America::Sao_Paulo
        );

        config.timezone = "Mars/Olympus".to_string();
        assert!(matches!(
            BillingCalendar::from_config(&config),
            Err(BillingError::UnknownTimezone(_))
        ));
    }
}
