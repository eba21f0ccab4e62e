//! Per-month aggregation of projected installments.

pub mod aggregator;
pub mod types;

pub use aggregator::MonthAggregator;
pub use types::{MonthGroup, MonthItem, MonthOrder};
