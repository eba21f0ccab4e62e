//! Billing events and the notifications they produce.

use std::fmt;

use fatura_shared::types::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::MonthKey;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Something succeeded.
    Info,
    /// Something needs attention.
    Warning,
    /// Something failed.
    Error,
}

impl NotificationLevel {
    /// Lowercase name used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Recipient.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Body.
    pub message: String,
    /// Severity.
    pub level: NotificationLevel,
}

/// Something that happened to a user's billing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEvent {
    /// A transaction was created.
    TransactionCreated {
        /// Transaction title.
        title: String,
    },
    /// A transaction was edited.
    TransactionUpdated {
        /// Transaction title.
        title: String,
    },
    /// A transaction was soft-deleted.
    TransactionRemoved {
        /// Transaction title.
        title: String,
    },
    /// A soft-deleted transaction was restored.
    TransactionRestored {
        /// Transaction title.
        title: String,
    },
    /// A month payment was registered.
    PaymentsRegistered {
        /// Paid month.
        month_key: MonthKey,
        /// Amount added to the ledger.
        amount: Decimal,
    },
    /// An import batch was stored.
    ImportCompleted {
        /// Rows imported.
        count: usize,
    },
    /// An import batch was rejected.
    ImportFailed {
        /// Why.
        reason: String,
    },
    /// An operation failed unexpectedly.
    OperationFailed {
        /// Operation name, e.g. "pay month".
        operation: &'static str,
    },
}

impl BillingEvent {
    /// Severity of the notification this event produces.
    #[must_use]
    pub const fn level(&self) -> NotificationLevel {
        match self {
            Self::TransactionRemoved { .. } => NotificationLevel::Warning,
            Self::ImportFailed { .. } | Self::OperationFailed { .. } => NotificationLevel::Error,
            _ => NotificationLevel::Info,
        }
    }

    /// Builds the notification for `user_id`.
    #[must_use]
    pub fn into_notification(self, user_id: UserId) -> Notification {
        let level = self.level();
        let (title, message) = match self {
            Self::TransactionCreated { title } => (
                "Fatura criada".to_string(),
                format!("A fatura \"{title}\" foi criada com sucesso."),
            ),
            Self::TransactionUpdated { title } => (
                "Fatura atualizada".to_string(),
                format!("A fatura \"{title}\" foi atualizada."),
            ),
            Self::TransactionRemoved { title } => (
                "Fatura removida".to_string(),
                format!("A fatura \"{title}\" foi removida."),
            ),
            Self::TransactionRestored { title } => (
                "Fatura restaurada".to_string(),
                format!("A fatura \"{title}\" foi restaurada."),
            ),
            Self::PaymentsRegistered { month_key, amount } => (
                "Pagamentos do mês".to_string(),
                format!(
                    "Pagamentos de {} registrados: R$ {amount}.",
                    month_key.label()
                ),
            ),
            Self::ImportCompleted { count } => (
                "Importação concluída".to_string(),
                format!("{count} faturas importadas com sucesso."),
            ),
            Self::ImportFailed { reason } => (
                "Falha na importação".to_string(),
                format!("Nenhuma fatura foi importada: {reason}"),
            ),
            Self::OperationFailed { operation } => (
                "Erro".to_string(),
                format!("Não foi possível concluir a operação ({operation})."),
            ),
        };

        Notification {
            user_id,
            title,
            message,
            level,
        }
    }
}
