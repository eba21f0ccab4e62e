//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{
    MONEY_SCALE, MoneyError, has_money_scale, parse_money, split_share, to_money,
};
