//! Flat export rows.
//!
//! One row per transaction, carrying the invoice month it is billed in and
//! the per-month amount. Turning rows into a file format is left to the caller.

pub mod service;

pub use service::{ExportAccount, ExportCategory, ExportFilter, ExportRow, ExportService};
