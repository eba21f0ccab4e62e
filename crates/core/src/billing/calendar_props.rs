//! Property-based tests for the billing calendar.
//!
//! - Cutoff correctness: a purchase lands in its own month iff its day is at
//!   or before `min(due_day, 28)`, otherwise in the next month.
//! - Month keys round-trip through their string form.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use super::account::DueDay;
use super::calendar::BillingCalendar;
use super::month::MonthKey;

/// Strategy to generate purchase dates between 2000 and 2040.
fn purchase_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2040, 1u32..=12, 1u32..=31).prop_filter_map("valid date", |(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d)
    })
}

/// Strategy to generate due days.
fn due_day() -> impl Strategy<Value = DueDay> {
    (1u32..=31).prop_map(|d| DueDay::new(d).unwrap())
}

proptest! {
    #[test]
    fn prop_cutoff_correctness(date in purchase_date(), due_day in due_day()) {
        let purchase_month = MonthKey::from_date(date);
        let resolved = BillingCalendar::month_for_date(date, Some(due_day));

        if date.day() <= due_day.day().min(28) {
            prop_assert_eq!(resolved, purchase_month);
        } else {
            prop_assert_eq!(resolved, purchase_month.next());
        }
    }

    #[test]
    fn prop_no_due_day_is_purchase_month(date in purchase_date()) {
        prop_assert_eq!(
            BillingCalendar::month_for_date(date, None),
            MonthKey::from_date(date)
        );
    }

    #[test]
    fn prop_month_key_string_round_trip(year in 1i32..=9999, month in 1u32..=12) {
        let key = MonthKey::new(year, month).unwrap();
        prop_assert_eq!(key.to_string().parse::<MonthKey>().unwrap(), key);
    }

    #[test]
    fn prop_add_months_is_inverse_of_months_until(
        year in 1900i32..2100,
        month in 1u32..=12,
        shift in -600i32..600,
    ) {
        let key = MonthKey::new(year, month).unwrap();
        prop_assert_eq!(key.months_until(key.add_months(shift)), shift);
    }
}
