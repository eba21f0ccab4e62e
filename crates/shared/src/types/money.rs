//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` values carrying two fraction digits.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// Number of fraction digits stored for every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Errors produced while reading a monetary amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The text is not a decimal number.
    #[error("Malformed amount: {0}")]
    Malformed(String),

    /// More than two fraction digits.
    #[error("Amount has more than two decimal places: {0}")]
    TooManyDecimals(String),

    /// Amount below zero.
    #[error("Amount cannot be negative: {0}")]
    Negative(String),
}

/// Rounds an amount to cents using Banker's Rounding.
///
/// The result always carries exactly two fraction digits, so `40` becomes
/// `40.00`.
#[must_use]
pub fn to_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Returns the `index`-th (1-based) of `parts` slices of `amount`.
///
/// Uses the Largest Remainder Method: every slice gets `amount / parts`
/// truncated to cents and the leftover cents go one each to the first
/// slices, so the slices always sum to `amount`. `parts` of zero is treated
/// as one and `index` is clamped into `1..=parts`.
#[must_use]
pub fn split_share(amount: Decimal, parts: u32, index: u32) -> Decimal {
    let total = to_money(amount);
    let parts = parts.max(1);
    if parts == 1 {
        return total;
    }

    let count = Decimal::from(parts);
    let unit = Decimal::new(1, MONEY_SCALE);
    let base = (total / count).round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::ToZero);
    let extra = ((total - base * count) / unit)
        .trunc()
        .to_u32()
        .unwrap_or(0);

    let share = if index.clamp(1, parts) <= extra {
        base + unit
    } else {
        base
    };
    to_money(share)
}

/// Returns true if the amount fits in two fraction digits.
#[must_use]
pub fn has_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

/// Parses a non-negative amount such as `"120.00"` or `"120,00"`.
///
/// # Errors
///
/// Returns `MoneyError` when the text is not a number, is negative, or has
/// more than two fraction digits.
pub fn parse_money(input: &str) -> Result<Decimal, MoneyError> {
    let trimmed = input.trim();
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replace(',', ".")
    };

    let amount =
        Decimal::from_str(&normalized).map_err(|_| MoneyError::Malformed(input.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyError::Negative(input.to_string()));
    }
    if !has_money_scale(amount) {
        return Err(MoneyError::TooManyDecimals(input.to_string()));
    }

    Ok(to_money(amount))
}
