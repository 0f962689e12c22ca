//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for movements, records, and finance reports
//! - JSON error mapping for domain errors
//!
//! Routes are generic over the record store so the same router serves
//! Postgres in production and an in-memory store in tests.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use bizdesk_core::dashboard::DashboardService;
use bizdesk_core::movement::{MovementRules, MovementService};
use bizdesk_core::store::FinanceStore;
use bizdesk_shared::{AppError, FinanceConfig};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
pub struct AppState<S: FinanceStore> {
    /// Record store.
    pub store: Arc<S>,
    /// Movement write and read service.
    pub movements: Arc<MovementService<S>>,
    /// Dashboard and report service.
    pub dashboard: Arc<DashboardService<S>>,
    /// Finance settings.
    pub finance: Arc<FinanceConfig>,
    /// Timezone that decides "today".
    pub tz: Tz,
}

impl<S: FinanceStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            movements: Arc::clone(&self.movements),
            dashboard: Arc::clone(&self.dashboard),
            finance: Arc::clone(&self.finance),
            tz: self.tz,
        }
    }
}

impl<S: FinanceStore> AppState<S> {
    /// Builds the services over `store`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configured timezone is unknown.
    pub fn new(store: Arc<S>, finance: FinanceConfig) -> Result<Self, AppError> {
        let tz = finance.tz()?;
        Ok(Self {
            movements: Arc::new(MovementService::new(
                Arc::clone(&store),
                MovementRules::from_config(&finance),
            )),
            dashboard: Arc::new(DashboardService::new(Arc::clone(&store))),
            store,
            finance: Arc::new(finance),
            tz,
        })
    }

    /// Current calendar date in the configured timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

/// Creates the main application router.
pub fn create_router<S: FinanceStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes::<S>())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
