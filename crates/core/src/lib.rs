//! Core business logic for Fatura.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `billing` - Month keys, due days and the billing calendar resolver
//! - `installment` - Installment span checks and forward projection
//! - `aggregation` - Per-month grouping, totals and pending bills
//! - `settlement` - "Pay this month" state machine and settlement plans
//! - `effective` - Picks the month a user should act on
//! - `transaction` - Transaction domain types, inputs and invariants
//! - `import` - Bulk import row resolution
//! - `dashboard` - Dashboard read models
//! - `export` - Flat export rows
//! - `notification` - Fire-and-forget notification contract

pub mod aggregation;
pub mod billing;
pub mod clock;
pub mod dashboard;
pub mod effective;
pub mod engine;
pub mod export;
pub mod import;
pub mod installment;
pub mod notification;
pub mod settlement;
pub mod transaction;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::BillingEngine;
