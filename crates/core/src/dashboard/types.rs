//! Dashboard data types.

use serde::{Deserialize, Serialize};

use crate::calendar::Period;
use crate::reports::{BalancePoint, CategoryTotal, MonthlyBucket};

/// Monthly chart data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// Income, expense, and profit per month, oldest first.
    pub months: Vec<MonthlyBucket>,
    /// Cumulative profit across the same months, starting from zero.
    pub cumulative: Vec<BalancePoint>,
}

/// Expense-by-category chart data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    /// Window the breakdown covers.
    pub period: Period,
    /// Totals per category, largest first.
    pub categories: Vec<CategoryTotal>,
}
