//! Paid ledger: running totals settled per user, month and account.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fatura_shared::types::{AccountId, PaidLedgerId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::MonthKey;

/// Scope key stored for ledger rows without an account.
pub const UNASSIGNED_SCOPE_KEY: &str = "none";

/// Non-null uniqueness key of a ledger row: the account id, or `"none"`.
#[must_use]
pub fn scope_key(account_id: Option<AccountId>) -> String {
    account_id.map_or_else(|| UNASSIGNED_SCOPE_KEY.to_string(), |id| id.to_string())
}

/// A persisted ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidLedgerEntry {
    /// Row ID.
    pub id: PaidLedgerId,
    /// Owning user.
    pub user_id: UserId,
    /// Settled month.
    pub month_key: MonthKey,
    /// Account the payment was scoped to.
    pub account_id: Option<AccountId>,
    /// Running total paid. Only ever increases.
    pub total_paid: Decimal,
    /// Date of the latest payment.
    pub paid_at: NaiveDate,
}

/// Which ledger rows a read considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerScope {
    /// Rows of every account, including unassigned ones.
    #[default]
    AllAccounts,
    /// Only rows recorded without an account.
    Unassigned,
    /// Only rows of one account.
    Account(AccountId),
}

impl LedgerScope {
    /// Scope matching an optional account filter.
    #[must_use]
    pub const fn for_account(account_id: Option<AccountId>) -> Self {
        match account_id {
            Some(id) => Self::Account(id),
            None => Self::AllAccounts,
        }
    }

    /// True when a row recorded for `account_id` falls in this scope.
    #[must_use]
    pub fn includes(self, account_id: Option<AccountId>) -> bool {
        match self {
            Self::AllAccounts => true,
            Self::Unassigned => account_id.is_none(),
            Self::Account(id) => account_id == Some(id),
        }
    }
}

/// Snapshot of settled months, summed over the rows of one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaidMonths(BTreeMap<MonthKey, Decimal>);

impl PaidMonths {
    /// Empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the snapshot from the rows in `scope`.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a PaidLedgerEntry>,
        scope: LedgerScope,
    ) -> Self {
        let mut paid = Self::new();
        for entry in entries.into_iter().filter(|e| scope.includes(e.account_id)) {
            paid.record(entry.month_key, entry.total_paid);
        }
        paid
    }

    /// Adds `amount` to `month`.
    pub fn record(&mut self, month: MonthKey, amount: Decimal) {
        *self.0.entry(month).or_insert(Decimal::ZERO) += amount;
    }

    /// True when the month has a ledger row.
    #[must_use]
    pub fn contains(&self, month: MonthKey) -> bool {
        self.0.contains_key(&month)
    }

    /// Total paid for the month (zero when absent).
    #[must_use]
    pub fn total_for(&self, month: MonthKey) -> Decimal {
        self.0.get(&month).copied().unwrap_or(Decimal::ZERO)
    }
}

impl FromIterator<(MonthKey, Decimal)> for PaidMonths {
    fn from_iter<T: IntoIterator<Item = (MonthKey, Decimal)>>(iter: T) -> Self {
        let mut paid = Self::new();
        for (month, amount) in iter {
            paid.record(month, amount);
        }
        paid
    }
}
