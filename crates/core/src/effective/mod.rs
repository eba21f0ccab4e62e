//! Effective-month selection.

pub mod selector;

pub use selector::{EffectiveMonth, EffectiveMonthSelector};
