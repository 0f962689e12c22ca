//! Report data types.

use bizdesk_shared::types::CategoryId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::Period;

/// Label for expenses without a category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Settled income and expense within a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Window the totals cover.
    pub period: Period,
    /// Paid income.
    pub income: Decimal,
    /// Paid expense.
    pub expense: Decimal,
    /// Income minus expense.
    pub profit: Decimal,
}

/// Open (unsettled) amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingTotals {
    /// Open income.
    pub receivable: Decimal,
    /// Open expense.
    pub payable: Decimal,
    /// Open income already past due.
    pub overdue_receivable: Decimal,
    /// Open expense already past due.
    pub overdue_payable: Decimal,
    /// Number of open movements past due.
    pub overdue_count: usize,
}

/// One month of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// First day of the month.
    pub month_start: NaiveDate,
    /// Short label, e.g. `"Mar 24"`.
    pub label: String,
    /// Paid income in the month.
    pub income: Decimal,
    /// Paid expense in the month.
    pub expense: Decimal,
    /// Income minus expense.
    pub profit: Decimal,
}

/// Paid expense total for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category, if the movements had one.
    pub category_id: Option<CategoryId>,
    /// Category name, the raw ID for unknown categories, or [`UNCATEGORIZED`].
    pub label: String,
    /// Summed value.
    pub total: Decimal,
}

/// Cumulative balance at the end of a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    /// First day of the month.
    pub month_start: NaiveDate,
    /// Short label, e.g. `"Mar 24"`.
    pub label: String,
    /// Balance after the month's profit.
    pub balance: Decimal,
}

/// Dashboard summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialOverview {
    /// Day the overview was computed for.
    pub as_of: NaiveDate,
    /// Sum of active account balances.
    pub total_balance: Decimal,
    /// Settled totals for the month containing `as_of`.
    pub month: PeriodTotals,
    /// Open amounts across all due dates.
    pub outstanding: OutstandingTotals,
}
