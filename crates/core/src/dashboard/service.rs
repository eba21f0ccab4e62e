//! Dashboard service.

use chrono::{Days, NaiveDate};
use fatura_shared::types::CategoryId;

use super::types::{
    BaseStats, CategorySpending, DashboardQuery, DashboardStats, MonthSummary, MonthlyOverview,
    UNCATEGORIZED_LABEL,
};
use crate::aggregation::{MonthAggregator, MonthOrder};
use crate::billing::{BillingAccount, MonthKey};
use crate::clock::Clock;
use crate::effective::EffectiveMonthSelector;
use crate::engine::BillingEngine;
use crate::settlement::PaidMonths;
use crate::transaction::{Transaction, TransactionRecord, TransactionStatus, TransactionType};

/// Calendar months shown in the dashboard chart.
const SUMMARY_MONTHS: i32 = 6;

/// Window of the top-categories ranking, today included.
const RECENT_DAYS: u64 = 30;

/// Categories kept in the ranking.
const TOP_CATEGORIES: usize = 6;

/// Dashboard read models.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardService;

impl DashboardService {
    /// Credit transactions grouped per billing month, oldest first, with the
    /// effective month for `account`.
    pub fn monthly_overview(
        engine: &BillingEngine,
        records: &[TransactionRecord],
        paid: &PaidMonths,
        query: &DashboardQuery,
        account: Option<&BillingAccount>,
        clock: &impl Clock,
    ) -> MonthlyOverview {
        let credits = records
            .iter()
            .filter(|r| query.matches(&r.transaction) && r.transaction.is_credit());
        let groups = engine.group_months(credits, paid, MonthOrder::Ascending, clock.today());

        let nominal = engine
            .calendar()
            .resolve_current_billing_month_key(account, clock);
        let current_month_key = EffectiveMonthSelector::resolve(&groups, nominal).month_key;

        MonthlyOverview {
            groups,
            current_month_key,
        }
    }

    /// Dashboard header statistics.
    pub fn stats(
        engine: &BillingEngine,
        records: &[TransactionRecord],
        paid: &PaidMonths,
        query: &DashboardQuery,
        account: Option<&BillingAccount>,
        clock: &impl Clock,
    ) -> DashboardStats {
        let today = clock.today();
        let filtered: Vec<&TransactionRecord> = records
            .iter()
            .filter(|r| query.matches(&r.transaction))
            .collect();

        let unpaid_credits = filtered
            .iter()
            .copied()
            .filter(|r| r.transaction.is_credit() && !r.transaction.is_paid());
        let groups = engine.group_months(unpaid_credits, paid, MonthOrder::Ascending, today);

        let nominal = engine
            .calendar()
            .resolve_current_billing_month_key(account, clock);
        let effective = EffectiveMonthSelector::resolve(&groups, nominal);

        let transactions: Vec<&Transaction> = filtered.iter().map(|r| &r.transaction).collect();
        let this_month = MonthKey::from_date(today);

        DashboardStats {
            base: Self::base_stats(transactions.iter().copied()),
            current_month_key: effective.month_key,
            current_month_label: effective.group.map(|g| g.month_label.clone()),
            current_month_pending_bill: MonthAggregator::calculate_pending_bill(effective.group),
            current_month_debit_total: transactions
                .iter()
                .filter(|t| {
                    t.transaction_type == TransactionType::Debit
                        && MonthKey::from_date(engine.calendar().local_date(t.created_at))
                            == this_month
                })
                .map(|t| t.amount)
                .sum(),
            monthly_summary: Self::monthly_summary(engine, &transactions, paid, today),
            top_spending_categories: Self::top_spending_categories(engine, &filtered, today),
        }
    }

    /// Paid and pending totals per transaction type.
    pub fn base_stats<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> BaseStats {
        let mut stats = BaseStats::default();
        for tx in transactions {
            let bucket = match (tx.transaction_type, tx.is_paid()) {
                (TransactionType::Credit, true) => &mut stats.total_income,
                (TransactionType::Debit, true) => &mut stats.total_expenses,
                (TransactionType::Credit, false) => &mut stats.pending_income,
                (TransactionType::Debit, false) => &mut stats.pending_expenses,
            };
            *bucket += tx.amount;
            if tx.status == TransactionStatus::Overdue {
                stats.overdue_count += 1;
            }
        }
        stats
    }

    /// The last six calendar months, oldest first.
    pub fn monthly_summary(
        engine: &BillingEngine,
        transactions: &[&Transaction],
        paid: &PaidMonths,
        today: NaiveDate,
    ) -> Vec<MonthSummary> {
        let first = MonthKey::from_date(today).add_months(1 - SUMMARY_MONTHS);

        (0..SUMMARY_MONTHS)
            .map(|offset| {
                let month_key = first.add_months(offset);
                let debit_total = transactions
                    .iter()
                    .filter(|t| {
                        t.transaction_type == TransactionType::Debit
                            && MonthKey::from_date(engine.calendar().local_date(t.created_at))
                                == month_key
                    })
                    .map(|t| t.amount)
                    .sum();
                MonthSummary {
                    month_key,
                    month_label: month_key.short_label(),
                    invoice_total: paid.total_for(month_key),
                    debit_total,
                }
            })
            .collect()
    }

    /// Top categories by amount over the last 30 days.
    ///
    /// Counts paid debits and every credit purchase.
    pub fn top_spending_categories(
        engine: &BillingEngine,
        records: &[&TransactionRecord],
        today: NaiveDate,
    ) -> Vec<CategorySpending> {
        let window_start = today
            .checked_sub_days(Days::new(RECENT_DAYS - 1))
            .unwrap_or(NaiveDate::MIN);

        let mut ranking: Vec<CategorySpending> = Vec::new();
        for record in records {
            let tx = &record.transaction;
            let date = engine.calendar().local_date(tx.created_at);
            let counts = tx.is_credit() || tx.is_paid();
            if !counts || date < window_start || date > today {
                continue;
            }

            let category_id: Option<CategoryId> = record.category.as_ref().map(|c| c.id);
            match ranking.iter_mut().find(|c| c.category_id == category_id) {
                Some(spending) => spending.total += tx.amount,
                None => ranking.push(CategorySpending {
                    category_id,
                    category_name: record
                        .category_name()
                        .unwrap_or(UNCATEGORIZED_LABEL)
                        .to_string(),
                    total: tx.amount,
                }),
            }
        }

        ranking.sort_by(|a, b| b.total.cmp(&a.total));
        ranking.truncate(TOP_CATEGORIES);
        ranking
    }
}
