//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod banks;
pub mod categories;
pub mod notifications;
pub mod paid_months;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod users;
