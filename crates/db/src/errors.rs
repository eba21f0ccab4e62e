//! Conversions from repository errors into [`AppError`].

use fatura_core::import::ImportError as RowError;
use fatura_core::transaction::InputError;
use fatura_shared::AppError;
use sea_orm::DbErr;

use crate::repositories::{
    AccountError, CatalogError, ImportError, SettlementError, TransactionError,
};

fn database(error: &DbErr) -> AppError {
    AppError::Database(error.to_string())
}

fn input(error: &InputError) -> AppError {
    match error {
        InputError::NotRemoved => AppError::BusinessRule(error.to_string()),
        _ => AppError::Validation(error.to_string()),
    }
}

impl From<TransactionError> for AppError {
    fn from(error: TransactionError) -> Self {
        match &error {
            TransactionError::NotFound(_)
            | TransactionError::AccountNotFound(_)
            | TransactionError::CategoryNotFound(_) => Self::NotFound(error.to_string()),
            TransactionError::Input(e) => input(e),
            TransactionError::Database(e) => database(e),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(error: AccountError) -> Self {
        match &error {
            AccountError::NotFound(_) | AccountError::BankNotFound(_) => {
                Self::NotFound(error.to_string())
            }
            AccountError::Duplicate(_) => Self::Conflict(error.to_string()),
            AccountError::InvalidDueDay(_) => Self::Validation(error.to_string()),
            AccountError::Database(e) => database(e),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        match &error {
            CatalogError::DuplicateBank(_) | CatalogError::DuplicateCategory(_) => {
                Self::Conflict(error.to_string())
            }
            CatalogError::BlankName => Self::Validation(error.to_string()),
            CatalogError::Database(e) => database(e),
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(error: SettlementError) -> Self {
        match &error {
            SettlementError::AccountNotFound(_) => Self::NotFound(error.to_string()),
            SettlementError::Database(e) => database(e),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(error: ImportError) -> Self {
        match error {
            ImportError::Row(row) => row_error(&row),
            ImportError::Transaction(e) => e.into(),
            ImportError::Database(e) => database(&e),
        }
    }
}

fn row_error(error: &RowError) -> AppError {
    match error {
        RowError::AccountNotFound { .. } | RowError::CategoryNotFound { .. } => {
            AppError::BusinessRule(error.to_string())
        }
        RowError::InvalidRow { .. } => AppError::Validation(error.to_string()),
    }
}
