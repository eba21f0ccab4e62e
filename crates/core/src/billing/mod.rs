//! Billing months and the due-day calendar.
//!
//! A transaction's monetary effect lands in a billing month ("YYYY-MM")
//! decided by the account's due day. Purchases made after the cutoff
//! belong to the following month's invoice.

pub mod account;
pub mod calendar;
pub mod error;
pub mod month;

#[cfg(test)]
mod calendar_props;

pub use account::{BillingAccount, DUE_DAY_CUTOFF_CAP, DueDay};
pub use calendar::BillingCalendar;
pub use error::BillingError;
pub use month::MonthKey;
