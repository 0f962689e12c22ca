//! Reference record routes: accounts, categories, and parties.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use bizdesk_core::records::{AccountKind, CategoryType, PartyKind, RecordStatus};
use bizdesk_core::store::{AccountFilter, CategoryFilter, FinanceStore, PartyFilter};
use bizdesk_shared::types::PartyId;
use serde::Deserialize;
use tracing::info;

use super::movements::parse_label;
use crate::AppState;
use crate::error::ApiError;

/// Creates the record routes.
pub fn routes<S: FinanceStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/accounts", get(list_accounts::<S>))
        .route("/categories", get(list_categories::<S>))
        .route("/parties", get(list_parties::<S>))
        .route(
            "/parties/{id}",
            delete(delete_party::<S>).patch(update_party_status::<S>),
        )
}

/// Query parameters shared by the record lists.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    /// Record status label.
    pub status: Option<String>,
    /// Account or party kind label.
    pub kind: Option<String>,
    /// Category type label.
    #[serde(rename = "type")]
    pub category_type: Option<String>,
    /// Party name, email, or phone substring.
    pub search: Option<String>,
}

/// Request body for activating or deactivating a party.
#[derive(Debug, Default, Deserialize)]
pub struct PartyStatusRequest {
    /// Record status label.
    pub status: Option<String>,
}

impl RecordQuery {
    fn status(&self) -> Result<Option<RecordStatus>, ApiError> {
        parse_label(self.status.as_deref(), "status", RecordStatus::parse)
    }
}

/// GET `/accounts` - List accounts ordered by name.
async fn list_accounts<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RecordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = AccountFilter {
        status: query.status()?,
        kind: parse_label(query.kind.as_deref(), "kind", AccountKind::parse)?,
    };
    Ok(Json(state.store.list_accounts(&filter).await?))
}

/// GET `/categories` - List categories ordered by name.
async fn list_categories<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RecordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = CategoryFilter {
        status: query.status()?,
        category_type: parse_label(query.category_type.as_deref(), "type", CategoryType::parse)?,
    };
    Ok(Json(state.store.list_categories(&filter).await?))
}

/// GET `/parties` - List customers and suppliers ordered by name.
async fn list_parties<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<RecordQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = PartyFilter {
        status: query.status()?,
        kind: parse_label(query.kind.as_deref(), "kind", PartyKind::parse)?,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };
    Ok(Json(state.store.list_parties(&filter).await?))
}

/// PATCH `/parties/{id}` - Activate or deactivate a party.
async fn update_party_status<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<PartyId>,
    Json(payload): Json<PartyStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let status = parse_label(payload.status.as_deref(), "status", RecordStatus::parse)?
        .ok_or_else(|| ApiError::bad_request("status is required"))?;
    let party = state.store.update_party_status(id, status).await?;
    info!(party_id = %id, status = %status, "Party status updated");

    Ok(Json(party))
}

/// DELETE `/parties/{id}` - Hard-delete a party.
async fn delete_party<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<PartyId>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_party(id).await?;
    info!(party_id = %id, "Party deleted");

    Ok(StatusCode::NO_CONTENT)
}
