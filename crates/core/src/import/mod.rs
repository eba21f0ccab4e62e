//! Bulk import of transaction rows.
//!
//! Rows arrive already parsed from a spreadsheet. Line numbers in errors are
//! spreadsheet lines: the header is line 1, so row `i` is line `i + 2`.

pub mod error;
pub mod resolver;
pub mod types;

pub use error::ImportError;
pub use resolver::{ImportResolver, line_number, parse_flag};
pub use types::ImportRow;
