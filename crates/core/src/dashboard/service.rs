//! Store-backed dashboard service.

use std::sync::Arc;

use bizdesk_shared::config::MAX_REPORT_MONTHS;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{CategoryReport, MonthlyReport};
use crate::calendar::{Period, month_start, sub_months};
use crate::movement::{MovementStatus, MovementType};
use crate::reports::{FinancialOverview, ReportError, ReportService};
use crate::store::{AccountFilter, CategoryFilter, DateRange, FinanceStore, MovementFilter, MovementOrder};

/// Dashboard service for loading and aggregating report input.
pub struct DashboardService<S: FinanceStore> {
    store: Arc<S>,
}

impl<S: FinanceStore> DashboardService<S> {
    /// Create a new dashboard service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Summary cards for `today`: balance, month totals, and open amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if a store query fails.
    pub async fn overview(&self, today: NaiveDate) -> Result<FinancialOverview, ReportError> {
        let month = Period::month_of(today);

        let mut movements = self
            .store
            .list_movements(&MovementFilter {
                statuses: vec![MovementStatus::Paid],
                paid: month.into(),
                ..MovementFilter::default()
            })
            .await?;
        movements.extend(self.store.list_movements(&MovementFilter::open()).await?);

        let accounts = self.store.list_accounts(&AccountFilter::active()).await?;

        Ok(ReportService::financial_overview(&movements, &accounts, today))
    }

    /// Income and expense per month for the `months` months ending with
    /// the month containing `today`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonths` if `months` is zero or too large, or an
    /// error if the store query fails.
    pub async fn monthly_report(
        &self,
        today: NaiveDate,
        months: u32,
    ) -> Result<MonthlyReport, ReportError> {
        if months == 0 || months > MAX_REPORT_MONTHS {
            return Err(ReportError::InvalidMonths {
                requested: months,
                max: MAX_REPORT_MONTHS,
            });
        }

        let current = Period::month_of(today);
        let first = sub_months(month_start(today), months - 1).unwrap_or(current.start);

        let movements = self
            .store
            .list_movements(&MovementFilter {
                statuses: vec![MovementStatus::Paid],
                paid: DateRange {
                    from: Some(first),
                    to: Some(current.end),
                },
                order: MovementOrder::PaymentDateDesc,
                ..MovementFilter::default()
            })
            .await?;

        let series = ReportService::monthly_series(&movements, today, months);
        let cumulative = ReportService::running_balance(Decimal::ZERO, &series);
        Ok(MonthlyReport {
            months: series,
            cumulative,
        })
    }

    /// Paid expenses in `period` grouped by category.
    ///
    /// # Errors
    ///
    /// Returns an error if a store query fails.
    pub async fn category_report(&self, period: Period) -> Result<CategoryReport, ReportError> {
        let movements = self
            .store
            .list_movements(&MovementFilter::paid_in(MovementType::Expense, period))
            .await?;
        let categories = self.store.list_categories(&CategoryFilter::default()).await?;

        Ok(CategoryReport {
            period,
            categories: ReportService::category_breakdown(&movements, &categories, period),
        })
    }
}
