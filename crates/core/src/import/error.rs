//! Import error types.

use thiserror::Error;

/// Import errors. Every variant names the offending spreadsheet line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// No account of the user's belongs to a bank with this name.
    #[error("Account not found for the name given on line {line}: {name}")]
    AccountNotFound {
        /// Spreadsheet line.
        line: usize,
        /// Bank name as written.
        name: String,
    },

    /// The user has no category with this name.
    #[error("Category not found for the name given on line {line}: {name}")]
    CategoryNotFound {
        /// Spreadsheet line.
        line: usize,
        /// Category name as written.
        name: String,
    },

    /// A field failed to parse or validate.
    #[error("Invalid row on line {line}: {message}")]
    InvalidRow {
        /// Spreadsheet line.
        line: usize,
        /// What was wrong.
        message: String,
    },
}

impl ImportError {
    /// Spreadsheet line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::AccountNotFound { line, .. }
            | Self::CategoryNotFound { line, .. }
            | Self::InvalidRow { line, .. } => *line,
        }
    }
}
