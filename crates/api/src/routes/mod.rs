//! API route definitions.

use axum::Router;
use bizdesk_core::store::FinanceStore;

use crate::AppState;

pub mod finance;
pub mod health;
pub mod movements;
pub mod records;

#[cfg(test)]
mod tests;

/// Creates the API router with all routes.
pub fn api_routes<S: FinanceStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .merge(health::routes())
        .merge(movements::routes())
        .merge(records::routes())
        .merge(finance::routes())
}
