//! Notification contract.
//!
//! Billing operations report what happened as [`BillingEvent`]s. A sink turns
//! them into stored notifications. Sinks are fire-and-forget: an operation
//! never waits for, or fails because of, its notification.

pub mod event;
pub mod sink;

pub use event::{BillingEvent, Notification, NotificationLevel};
pub use sink::{NotificationSink, NullSink, RecordingSink};
