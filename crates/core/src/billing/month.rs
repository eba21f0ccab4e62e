//! Billing month key ("YYYY-MM").

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::BillingError;

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// A calendar month used as a billing bucket.
///
/// Ordering is chronological, so keys can be used directly as `BTreeMap` keys
/// and compared with `<`/`>`. Serializes as the `"YYYY-MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u8,
}

impl MonthKey {
    /// Creates a month key.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidMonthKey` if the month is outside 1..=12
    /// or the year outside 1..=9999.
    pub fn new(year: i32, month: u32) -> Result<Self, BillingError> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(BillingError::InvalidMonthKey(format!("{year:04}-{month:02}")));
        }
        let month = u8::try_from(month)
            .map_err(|_| BillingError::InvalidMonthKey(format!("{year:04}-{month:02}")))?;
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month, 1-based.
    #[must_use]
    pub fn month(self) -> u32 {
        u32::from(self.month)
    }

    /// Shifts the key by `months` (may be negative).
    #[must_use]
    pub fn add_months(self, months: i32) -> Self {
        Self::from_index(self.index() + months)
    }

    /// The following month.
    #[must_use]
    pub fn next(self) -> Self {
        self.add_months(1)
    }

    /// Signed number of months from `self` to `other`.
    #[must_use]
    pub fn months_until(self, other: Self) -> i32 {
        other.index() - self.index()
    }

    /// Absolute number of months between two keys.
    #[must_use]
    pub fn distance(self, other: Self) -> u32 {
        self.months_until(other).unsigned_abs()
    }

    /// Portuguese label, e.g. `"Abril 2024"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0()], self.year)
    }

    /// Abbreviated Portuguese label, e.g. `"Abr 2024"`.
    #[must_use]
    pub fn short_label(self) -> String {
        format!("{} {}", SHORT_MONTH_NAMES[self.month0()], self.year)
    }

    fn month0(self) -> usize {
        usize::from(self.month - 1)
    }

    fn index(self) -> i32 {
        self.year * 12 + i32::from(self.month) - 1
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_index(index: i32) -> Self {
        Self {
            year: index.div_euclid(12),
            month: (index.rem_euclid(12) + 1) as u8,
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BillingError::InvalidMonthKey(s.to_string());

        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = BillingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("2024-04", 2024, 4)]
    #[case("1999-12", 1999, 12)]
    #[case("2030-01", 2030, 1)]
    fn test_parse_valid_keys(#[case] input: &str, #[case] year: i32, #[case] month: u32) {
        let parsed = key(input);
        assert_eq!(parsed.year(), year);
        assert_eq!(parsed.month(), month);
        assert_eq!(parsed.to_string(), input);
    }

    #[rstest]
    #[case("2024-13")]
    #[case("2024-00")]
    #[case("2024-4")]
    #[case("24-04")]
    #[case("2024/04")]
    #[case("abcd-ef")]
    #[case("")]
    fn test_parse_rejects_malformed_keys(#[case] input: &str) {
        assert!(matches!(
            input.parse::<MonthKey>(),
            Err(BillingError::InvalidMonthKey(_))
        ));
    }

    #[test]
    fn test_add_months_crosses_year_boundaries() {
        assert_eq!(key("2024-11").add_months(3), key("2025-02"));
        assert_eq!(key("2024-01").add_months(-1), key("2023-12"));
        assert_eq!(key("2024-12").next(), key("2025-01"));
        assert_eq!(key("2024-06").add_months(-18), key("2022-12"));
    }

    #[test]
    fn test_months_until_and_distance() {
        assert_eq!(key("2024-04").months_until(key("2025-02")), 10);
        assert_eq!(key("2025-02").months_until(key("2024-04")), -10);
        assert_eq!(key("2025-02").distance(key("2024-04")), 10);
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(key("2023-12") < key("2024-01"));
        assert!(key("2024-02") > key("2024-01"));
    }

    #[test]
    fn test_portuguese_labels() {
        assert_eq!(key("2024-04").label(), "Abril 2024");
        assert_eq!(key("2024-03").label(), "Março 2024");
        assert_eq!(key("2024-04").short_label(), "Abr 2024");
        assert_eq!(key("2025-12").short_label(), "Dez 2025");
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        assert_eq!(MonthKey::from_date(date), key("2024-04"));
    }

    #[test]
    fn test_string_conversions() {
        assert_eq!(String::from(key("2024-04")), "2024-04");
        assert_eq!(MonthKey::try_from("2024-04".to_string()), Ok(key("2024-04")));
        assert!(MonthKey::try_from("2024-99".to_string()).is_err());
    }
}
