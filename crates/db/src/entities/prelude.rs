//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::banks::Entity as Banks;
pub use super::categories::Entity as Categories;
pub use super::notifications::Entity as Notifications;
pub use super::paid_months::Entity as PaidMonths;
pub use super::transactions::Entity as Transactions;
pub use super::users::Entity as Users;
