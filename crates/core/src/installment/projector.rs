//! Installment projector.

use rust_decimal::Decimal;

use crate::billing::{BillingCalendar, MonthKey};
use crate::installment::horizon::ProjectionHorizon;
use crate::transaction::{Transaction, TransactionRecord};

/// One installment of a transaction attributed to a billing month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedEntry<'a> {
    /// Source record.
    pub record: &'a TransactionRecord,
    /// Billing month the installment lands in.
    pub month_key: MonthKey,
    /// 1-based installment number.
    pub installment_index: u32,
}

impl ProjectedEntry<'_> {
    /// The projected transaction.
    #[must_use]
    pub const fn transaction(&self) -> &Transaction {
        &self.record.transaction
    }

    /// Contribution of this entry to its month.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.record
            .transaction
            .installment_amount(self.installment_index)
    }
}

/// Projects transactions onto the billing months they are charged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallmentProjector {
    calendar: BillingCalendar,
}

impl InstallmentProjector {
    /// Creates a projector over `calendar`.
    #[must_use]
    pub const fn new(calendar: BillingCalendar) -> Self {
        Self { calendar }
    }

    /// The underlying calendar.
    #[must_use]
    pub const fn calendar(&self) -> &BillingCalendar {
        &self.calendar
    }

    /// Billing month of the first installment.
    #[must_use]
    pub fn first_billing_month(&self, record: &TransactionRecord) -> MonthKey {
        self.calendar
            .resolve_billing_month_key(&record.transaction, record.account.as_ref())
    }

    /// Billing month of the last installment, `None` for recurring transactions.
    #[must_use]
    pub fn last_billing_month(&self, record: &TransactionRecord) -> Option<MonthKey> {
        if record.transaction.is_recurring {
            return None;
        }
        let span = record.transaction.installments() - 1;
        Some(
            self.first_billing_month(record)
                .add_months(i32::try_from(span).unwrap_or_default()),
        )
    }

    /// True when the transaction is charged in `target`.
    #[must_use]
    pub fn projects_onto_month(&self, record: &TransactionRecord, target: MonthKey) -> bool {
        let first = self.first_billing_month(record);
        if target < first {
            return false;
        }
        self.last_billing_month(record)
            .is_none_or(|last| target <= last)
    }

    /// Installment number charged in `month`.
    ///
    /// `None` for single-installment transactions and for months before the
    /// first installment. Months past the last installment report the last.
    #[must_use]
    pub fn installment_number_for_month(
        &self,
        record: &TransactionRecord,
        month: MonthKey,
    ) -> Option<u32> {
        let transaction = &record.transaction;
        if transaction.is_single_installment() {
            return None;
        }
        let offset = u32::try_from(self.first_billing_month(record).months_until(month)).ok()?;
        Some((offset + 1).min(transaction.installments()))
    }

    /// Lazy schedule of one record's installments.
    #[must_use]
    pub fn schedule<'a>(
        &self,
        record: &'a TransactionRecord,
        horizon: ProjectionHorizon,
    ) -> InstallmentSchedule<'a> {
        let remaining = (!record.transaction.is_recurring).then(|| record.transaction.installments());
        InstallmentSchedule {
            record,
            next_month: self.first_billing_month(record),
            next_index: 1,
            remaining,
            horizon,
        }
    }

    /// Lazy projection of every record onto its billing months.
    ///
    /// Installment transactions yield exactly `total_installments` entries.
    /// Recurring transactions yield one entry per month up to the horizon.
    pub fn project_all_months<'a, I>(
        &self,
        records: I,
        horizon: ProjectionHorizon,
    ) -> impl Iterator<Item = ProjectedEntry<'a>> + 'a
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
        I::IntoIter: 'a,
    {
        let projector = *self;
        records
            .into_iter()
            .flat_map(move |record| projector.schedule(record, horizon))
    }
}

/// Iterator over one record's projected installments.
#[derive(Debug, Clone)]
pub struct InstallmentSchedule<'a> {
    record: &'a TransactionRecord,
    next_month: MonthKey,
    next_index: u32,
    /// `None` for recurring schedules, which stop at the horizon instead.
    remaining: Option<u32>,
    horizon: ProjectionHorizon,
}

impl<'a> Iterator for InstallmentSchedule<'a> {
    type Item = ProjectedEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.remaining {
            Some(0) => return None,
            Some(ref mut remaining) => *remaining -= 1,
            None if !self.horizon.contains(self.next_month) => return None,
            None => {}
        }

        let entry = ProjectedEntry {
            record: self.record,
            month_key: self.next_month,
            installment_index: self.next_index,
        };
        self.next_month = self.next_month.next();
        self.next_index += 1;
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{BillingAccount, DueDay};
    use crate::transaction::{TransactionStatus, TransactionType};
    use chrono::{TimeZone, Utc};
    use fatura_shared::types::{AccountId, BankId, TransactionId, UserId};
    use rust_decimal_macros::dec;

    fn record(
        (y, m, d): (i32, u32, u32),
        installments: u32,
        recurring: bool,
        due_day: Option<u32>,
    ) -> TransactionRecord {
        let created_at = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        TransactionRecord {
            transaction: Transaction {
                id: TransactionId::new(),
                user_id: UserId::new(),
                account_id: None,
                category_id: None,
                title: "Compra".to_string(),
                description: None,
                amount: dec!(300.00),
                transaction_type: TransactionType::Credit,
                status: TransactionStatus::Unpaid,
                paid_date: None,
                total_installments: installments,
                current_installment: 0,
                is_recurring: recurring,
                created_at,
                updated_at: created_at,
                deleted_at: None,
            },
            account: due_day.map(|d| BillingAccount {
                id: AccountId::new(),
                bank_id: BankId::new(),
                bank_name: "Inter".to_string(),
                due_day: Some(DueDay::new(d).unwrap()),
            }),
            category: None,
        }
    }

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn months(entries: &[ProjectedEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.month_key.to_string()).collect()
    }

    #[test]
    fn test_installments_after_cutoff_start_next_month() {
        let projector = InstallmentProjector::default();
        let rec = record((2024, 4, 15), 3, false, Some(10));
        let horizon = ProjectionHorizon::until(key("2024-04"));

        let entries: Vec<_> = projector.schedule(&rec, horizon).collect();

        assert_eq!(months(&entries), ["2024-05", "2024-06", "2024-07"]);
        assert_eq!(
            entries.iter().map(|e| e.installment_index).collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert!(entries.iter().all(|e| e.amount() == dec!(100.00)));
    }

    #[test]
    fn test_recurring_stops_at_horizon() {
        let projector = InstallmentProjector::default();
        let rec = record((2024, 1, 5), 1, true, None);

        let entries: Vec<_> = projector
            .schedule(&rec, ProjectionHorizon::until(key("2024-04")))
            .collect();

        assert_eq!(months(&entries), ["2024-01", "2024-02", "2024-03", "2024-04"]);
    }

    #[test]
    fn test_recurring_after_horizon_yields_nothing() {
        let projector = InstallmentProjector::default();
        let rec = record((2024, 6, 5), 1, true, None);

        assert_eq!(
            projector
                .schedule(&rec, ProjectionHorizon::until(key("2024-04")))
                .count(),
            0
        );
    }

    #[test]
    fn test_projects_onto_month() {
        let projector = InstallmentProjector::default();
        let installments = record((2024, 4, 15), 3, false, Some(10));
        let recurring = record((2024, 4, 15), 1, true, Some(10));

        assert!(!projector.projects_onto_month(&installments, key("2024-04")));
        assert!(projector.projects_onto_month(&installments, key("2024-05")));
        assert!(projector.projects_onto_month(&installments, key("2024-07")));
        assert!(!projector.projects_onto_month(&installments, key("2024-08")));

        assert!(!projector.projects_onto_month(&recurring, key("2024-04")));
        assert!(projector.projects_onto_month(&recurring, key("2030-01")));
    }

    #[test]
    fn test_installment_number_for_month() {
        let projector = InstallmentProjector::default();
        let rec = record((2024, 4, 5), 3, false, None);
        let single = record((2024, 4, 5), 1, false, None);

        assert_eq!(projector.installment_number_for_month(&rec, key("2024-03")), None);
        assert_eq!(projector.installment_number_for_month(&rec, key("2024-04")), Some(1));
        assert_eq!(projector.installment_number_for_month(&rec, key("2024-06")), Some(3));
        assert_eq!(projector.installment_number_for_month(&rec, key("2024-09")), Some(3));
        assert_eq!(projector.installment_number_for_month(&single, key("2024-04")), None);
    }

    #[test]
    fn test_project_all_months_chains_records() {
        let projector = InstallmentProjector::default();
        let records = vec![
            record((2024, 4, 5), 2, false, None),
            record((2024, 4, 5), 1, false, None),
        ];

        let entries: Vec<_> = projector
            .project_all_months(&records, ProjectionHorizon::until(key("2024-12")))
            .collect();

        assert_eq!(months(&entries), ["2024-04", "2024-05", "2024-04"]);
    }

    #[test]
    fn test_last_billing_month() {
        let projector = InstallmentProjector::default();
        assert_eq!(
            projector.last_billing_month(&record((2024, 11, 20), 4, false, Some(15))),
            Some(key("2025-03"))
        );
        assert_eq!(
            projector.last_billing_month(&record((2024, 11, 20), 1, true, None)),
            None
        );
    }
}
