//! String-backed enums stored in the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionType {
    /// Credit purchase.
    #[sea_orm(string_value = "credit")]
    Credit,
    /// Debit purchase.
    #[sea_orm(string_value = "debit")]
    Debit,
}

/// Transaction status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionStatus {
    /// Not fully paid.
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    /// Fully paid.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Past due.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

/// Notification level column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum NotificationLevel {
    /// Informational.
    #[sea_orm(string_value = "info")]
    Info,
    /// Needs attention.
    #[sea_orm(string_value = "warning")]
    Warning,
    /// Failure.
    #[sea_orm(string_value = "error")]
    Error,
}

impl From<fatura_core::transaction::TransactionType> for TransactionType {
    fn from(value: fatura_core::transaction::TransactionType) -> Self {
        match value {
            fatura_core::transaction::TransactionType::Credit => Self::Credit,
            fatura_core::transaction::TransactionType::Debit => Self::Debit,
        }
    }
}

impl From<TransactionType> for fatura_core::transaction::TransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Credit => Self::Credit,
            TransactionType::Debit => Self::Debit,
        }
    }
}

impl From<fatura_core::transaction::TransactionStatus> for TransactionStatus {
    fn from(value: fatura_core::transaction::TransactionStatus) -> Self {
        match value {
            fatura_core::transaction::TransactionStatus::Unpaid => Self::Unpaid,
            fatura_core::transaction::TransactionStatus::Paid => Self::Paid,
            fatura_core::transaction::TransactionStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<TransactionStatus> for fatura_core::transaction::TransactionStatus {
    fn from(value: TransactionStatus) -> Self {
        match value {
            TransactionStatus::Unpaid => Self::Unpaid,
            TransactionStatus::Paid => Self::Paid,
            TransactionStatus::Overdue => Self::Overdue,
        }
    }
}

impl From<fatura_core::notification::NotificationLevel> for NotificationLevel {
    fn from(value: fatura_core::notification::NotificationLevel) -> Self {
        match value {
            fatura_core::notification::NotificationLevel::Info => Self::Info,
            fatura_core::notification::NotificationLevel::Warning => Self::Warning,
            fatura_core::notification::NotificationLevel::Error => Self::Error,
        }
    }
}

impl From<NotificationLevel> for fatura_core::notification::NotificationLevel {
    fn from(value: NotificationLevel) -> Self {
        match value {
            NotificationLevel::Info => Self::Info,
            NotificationLevel::Warning => Self::Warning,
            NotificationLevel::Error => Self::Error,
        }
    }
}
