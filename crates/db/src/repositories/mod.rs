//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod catalog;
pub mod import;
pub mod notification;
pub mod paid_ledger;
pub mod settlement;
pub mod transaction;
pub mod user;

pub use account::{AccountError, AccountRepository};
pub use catalog::{CatalogError, CatalogRepository};
pub use import::{ImportError, ImportRepository};
pub use notification::{DbNotificationSink, NotificationRepository};
pub use paid_ledger::PaidLedgerRepository;
pub use settlement::{SettlementError, SettlementRepository};
pub use transaction::{TransactionError, TransactionRepository};
pub use user::UserRepository;
