//! Month aggregator.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{MonthGroup, MonthItem, MonthOrder};
use crate::billing::MonthKey;
use crate::installment::{InstallmentProjector, ProjectedEntry};
use crate::settlement::PaidMonths;

/// Groups projected entries into billing months.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthAggregator {
    projector: InstallmentProjector,
}

impl MonthAggregator {
    /// Creates an aggregator resolving installment numbers with `projector`.
    #[must_use]
    pub const fn new(projector: InstallmentProjector) -> Self {
        Self { projector }
    }

    /// Groups entries per month and merges in the paid ledger.
    ///
    /// Items keep the order in which the entries were produced.
    pub fn group_by_month<'a>(
        &self,
        entries: impl IntoIterator<Item = ProjectedEntry<'a>>,
        paid: &PaidMonths,
        order: MonthOrder,
    ) -> Vec<MonthGroup> {
        let mut months: BTreeMap<MonthKey, Vec<MonthItem>> = BTreeMap::new();
        for entry in entries {
            months
                .entry(entry.month_key)
                .or_default()
                .push(self.item(&entry));
        }

        let groups = months.into_iter().map(|(month_key, items)| MonthGroup {
            month_key,
            month_label: month_key.label(),
            total_spent: items.iter().map(|i| i.installment_amount).sum(),
            is_paid: paid.contains(month_key),
            items,
        });

        match order {
            MonthOrder::Ascending => groups.collect(),
            MonthOrder::Descending => groups.rev().collect(),
        }
    }

    /// Amount still due for a month: zero when absent or paid.
    #[must_use]
    pub fn calculate_pending_bill(group: Option<&MonthGroup>) -> Decimal {
        match group {
            Some(group) if !group.is_paid => group.items.iter().map(|i| i.installment_amount).sum(),
            _ => Decimal::ZERO,
        }
    }

    fn item(&self, entry: &ProjectedEntry<'_>) -> MonthItem {
        let record = entry.record;
        let tx = &record.transaction;
        MonthItem {
            id: format!("{}-{}", tx.id, entry.installment_index),
            transaction_id: tx.id,
            title: tx.title.clone(),
            description: tx.description.clone(),
            amount: tx.amount,
            installment_amount: entry.amount(),
            transaction_type: tx.transaction_type,
            status: tx.status,
            created_at: tx.created_at,
            paid_date: tx.paid_date,
            total_installments: tx.total_installments,
            current_installment: tx.current_installment,
            display_installment: self
                .projector
                .installment_number_for_month(record, entry.month_key),
            is_recurring: tx.is_recurring,
            bank_name: record.bank_name().map(str::to_string),
            category_name: record.category_name().map(str::to_string),
        }
    }
}
