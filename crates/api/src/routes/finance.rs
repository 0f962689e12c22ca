//! Finance dashboard and report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use bizdesk_core::calendar::Period;
use bizdesk_core::store::FinanceStore;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

/// Creates the finance routes.
pub fn routes<S: FinanceStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/finance/overview", get(overview::<S>))
        .route("/finance/reports/monthly", get(monthly_report::<S>))
        .route("/finance/reports/categories", get(category_report::<S>))
}

/// Query parameters for the monthly report.
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyQuery {
    /// Number of months ending with the current one.
    pub months: Option<u32>,
}

/// Query parameters for the category report.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    /// First day included (default: start of the current month).
    pub from: Option<NaiveDate>,
    /// First day excluded (default: start of the next month).
    pub to: Option<NaiveDate>,
}

/// GET `/finance/overview` - Balance, month totals, and open amounts.
async fn overview<S: FinanceStore>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.dashboard.overview(state.today()).await?))
}

/// GET `/finance/reports/monthly` - Income and expense per month.
async fn monthly_report<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<MonthlyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let months = query.months.unwrap_or(state.finance.report_months);
    Ok(Json(state.dashboard.monthly_report(state.today(), months).await?))
}

/// GET `/finance/reports/categories` - Paid expenses per category.
async fn category_report<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let current = Period::month_of(state.today());
    let period = Period::new(
        query.from.unwrap_or(current.start),
        query.to.unwrap_or(current.end),
    )?;
    Ok(Json(state.dashboard.category_report(period).await?))
}
