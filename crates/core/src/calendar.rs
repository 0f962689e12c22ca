//! Calendar-month arithmetic and half-open date periods.
//!
//! Month arithmetic clamps the day-of-month to the last day of shorter
//! months, so 2024-01-31 plus one month is 2024-02-29.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reports::ReportError;

/// A half-open date window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First day included.
    pub start: NaiveDate,
    /// First day excluded.
    pub end: NaiveDate,
}

impl Period {
    /// Creates a period, rejecting windows whose end precedes the start.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidPeriod` if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if end < start {
            return Err(ReportError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        let start = month_start(date);
        Self {
            start,
            end: start
                .checked_add_months(Months::new(1))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Returns true if `date` falls within the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Returns true if `date` is present and falls within the window.
    #[must_use]
    pub fn contains_opt(&self, date: Option<NaiveDate>) -> bool {
        date.is_some_and(|d| self.contains(d))
    }
}

/// First day of the month containing `date`.
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Advances `date` by `months` calendar months, clamping the day-of-month.
///
/// Returns `None` only when the result leaves chrono's supported range.
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Moves `date` back by `months` calendar months, clamping the day-of-month.
#[must_use]
pub fn sub_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(months))
}

/// Short month label used by chart series, e.g. `"Mar 24"`.
#[must_use]
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %y").to_string()
}
