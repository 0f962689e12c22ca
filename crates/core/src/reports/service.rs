//! Aggregation over already-loaded movements.
//!
//! Every function is pure: it reads its inputs, never fails, and returns
//! zeros or zero-filled series for empty input. Only `income` and
//! `expense` movements count; transfers move money between owned accounts
//! and are left out of every total.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use bizdesk_shared::types::CategoryId;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    BalancePoint, CategoryTotal, FinancialOverview, MonthlyBucket, OutstandingTotals,
    PeriodTotals, UNCATEGORIZED,
};
use crate::calendar::{Period, month_label, month_start, sub_months};
use crate::movement::{Movement, MovementStatus, MovementType};
use crate::records::{Account, Category};
use crate::store::DateRange;

/// Service for aggregating movements into report figures.
pub struct ReportService;

impl ReportService {
    /// Sums paid income and paid expense whose payment date falls in `period`.
    #[must_use]
    pub fn period_totals(movements: &[Movement], period: Period) -> PeriodTotals {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;

        for m in movements
            .iter()
            .filter(|m| m.status == MovementStatus::Paid && period.contains_opt(m.payment_date))
        {
            match m.movement_type {
                MovementType::Income => income += m.value,
                MovementType::Expense => expense += m.value,
                MovementType::Transfer => {}
            }
        }

        PeriodTotals {
            period,
            income,
            expense,
            profit: income - expense,
        }
    }

    /// Sums open movements (stored pending or legacy overdue) by side.
    ///
    /// `due` restricts which due dates count; the overdue subset is judged
    /// against `today`.
    #[must_use]
    pub fn outstanding_totals(
        movements: &[Movement],
        due: DateRange,
        today: NaiveDate,
    ) -> OutstandingTotals {
        let mut totals = OutstandingTotals::default();

        for m in movements
            .iter()
            .filter(|m| m.status.is_open() && due.contains(m.due_date))
        {
            let overdue = m.is_overdue(today);
            match m.movement_type {
                MovementType::Income => {
                    totals.receivable += m.value;
                    if overdue {
                        totals.overdue_receivable += m.value;
                    }
                }
                MovementType::Expense => {
                    totals.payable += m.value;
                    if overdue {
                        totals.overdue_payable += m.value;
                    }
                }
                MovementType::Transfer => continue,
            }
            if overdue {
                totals.overdue_count += 1;
            }
        }

        totals
    }

    /// Builds `months` monthly buckets, oldest first, ending with the month
    /// containing `today`.
    #[must_use]
    pub fn monthly_series(movements: &[Movement], today: NaiveDate, months: u32) -> Vec<MonthlyBucket> {
        let current = month_start(today);
        (0..months)
            .rev()
            .filter_map(|back| sub_months(current, back))
            .map(|start| {
                let totals = Self::period_totals(movements, Period::month_of(start));
                MonthlyBucket {
                    month_start: start,
                    label: month_label(start),
                    income: totals.income,
                    expense: totals.expense,
                    profit: totals.profit,
                }
            })
            .collect()
    }

    /// Groups paid expenses settled in `period` by category.
    ///
    /// Sorted by total descending, then label ascending.
    #[must_use]
    pub fn category_breakdown(
        movements: &[Movement],
        categories: &[Category],
        period: Period,
    ) -> Vec<CategoryTotal> {
        let names: HashMap<CategoryId, &str> =
            categories.iter().map(|c| (c.id, c.name.as_str())).collect();

        let mut sums: BTreeMap<Option<CategoryId>, Decimal> = BTreeMap::new();
        for m in movements.iter().filter(|m| {
            m.movement_type == MovementType::Expense
                && m.status == MovementStatus::Paid
                && period.contains_opt(m.payment_date)
        }) {
            *sums.entry(m.category_id).or_default() += m.value;
        }

        let mut rows: Vec<CategoryTotal> = sums
            .into_iter()
            .map(|(category_id, total)| CategoryTotal {
                category_id,
                label: match category_id {
                    None => UNCATEGORIZED.to_string(),
                    Some(id) => names
                        .get(&id)
                        .map_or_else(|| id.to_string(), |name| (*name).to_string()),
                },
                total,
            })
            .collect();

        rows.sort_by(|a, b| {
            (Reverse(a.total), &a.label).cmp(&(Reverse(b.total), &b.label))
        });
        rows
    }

    /// Accumulates each bucket's profit onto `opening`.
    #[must_use]
    pub fn running_balance(opening: Decimal, series: &[MonthlyBucket]) -> Vec<BalancePoint> {
        series
            .iter()
            .scan(opening, |balance, bucket| {
                *balance += bucket.profit;
                Some(BalancePoint {
                    month_start: bucket.month_start,
                    label: bucket.label.clone(),
                    balance: *balance,
                })
            })
            .collect()
    }

    /// Sums the stored balance of active accounts.
    #[must_use]
    pub fn total_balance(accounts: &[Account]) -> Decimal {
        accounts
            .iter()
            .filter(|a| a.is_active())
            .map(|a| a.current_balance)
            .sum()
    }

    /// Builds the dashboard summary for `today`.
    #[must_use]
    pub fn financial_overview(
        movements: &[Movement],
        accounts: &[Account],
        today: NaiveDate,
    ) -> FinancialOverview {
        FinancialOverview {
            as_of: today,
            total_balance: Self::total_balance(accounts),
            month: Self::period_totals(movements, Period::month_of(today)),
            outstanding: Self::outstanding_totals(movements, DateRange::unbounded(), today),
        }
    }
}
