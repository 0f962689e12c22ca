//! Movement routes: listing, creation with installments, and settlement.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use bizdesk_core::movement::{MovementDraft, MovementQuery, MovementStatus, MovementType};
use bizdesk_core::store::{DateRange, FinanceStore, MovementOrder};
use bizdesk_shared::types::{AccountId, CategoryId, MovementId, PageRequest, PartyId};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// Creates the movement routes.
pub fn routes<S: FinanceStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/movements", get(list_movements::<S>).post(create_movement::<S>))
        .route("/movements/{id}", get(get_movement::<S>))
        .route("/movements/{id}/pay", post(pay_movement::<S>))
        .route("/movements/{id}/cancel", post(cancel_movement::<S>))
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for listing movements.
#[derive(Debug, Default, Deserialize)]
pub struct ListMovementsQuery {
    /// Description substring.
    pub search: Option<String>,
    /// Movement type label.
    #[serde(rename = "type")]
    pub movement_type: Option<String>,
    /// Effective status label.
    pub status: Option<String>,
    /// Owning account.
    pub account_id: Option<AccountId>,
    /// First due date included.
    pub due_from: Option<NaiveDate>,
    /// First due date excluded.
    pub due_to: Option<NaiveDate>,
    /// Result ordering.
    pub order: Option<MovementOrder>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// Amount as either a JSON string or a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// `"1200.50"`
    Text(String),
    /// `1200.5`
    Number(serde_json::Number),
}

impl AmountInput {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Request body for creating a movement.
#[derive(Debug, Deserialize)]
pub struct CreateMovementRequest {
    /// Movement type label.
    #[serde(rename = "type", default)]
    pub movement_type: String,
    /// Free-text label.
    #[serde(default)]
    pub description: String,
    /// Total amount.
    pub value: Option<AmountInput>,
    /// First due date (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: String,
    /// Owning account.
    pub account_id: Option<AccountId>,
    /// Destination account for transfers.
    pub destination_account_id: Option<AccountId>,
    /// Reporting category.
    pub category_id: Option<CategoryId>,
    /// Customer or supplier.
    pub party_id: Option<PartyId>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Settlement method.
    pub payment_method: Option<String>,
    /// External document reference.
    pub document: Option<String>,
    /// Number of monthly installments (default 1).
    pub installments: Option<u32>,
}

impl From<CreateMovementRequest> for MovementDraft {
    fn from(req: CreateMovementRequest) -> Self {
        Self {
            movement_type: req.movement_type,
            description: req.description,
            value: req.value.map(AmountInput::into_text).unwrap_or_default(),
            due_date: req.due_date,
            account_id: req.account_id,
            destination_account_id: req.destination_account_id,
            category_id: req.category_id,
            party_id: req.party_id,
            notes: req.notes,
            payment_method: req.payment_method,
            document: req.document,
            installments: req.installments.unwrap_or(1),
        }
    }
}

/// Request body for settling a movement.
#[derive(Debug, Default, Deserialize)]
pub struct PayRequest {
    /// Settlement date; today when omitted.
    pub payment_date: Option<NaiveDate>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/movements` - List movements with their effective status.
async fn list_movements<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListMovementsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movement_type = parse_label(query.movement_type.as_deref(), "type", MovementType::parse)?;
    let status = parse_label(query.status.as_deref(), "status", MovementStatus::parse)?;

    let filter = MovementQuery {
        movement_type,
        status,
        account_id: query.account_id,
        search: query.search.filter(|s| !s.trim().is_empty()),
        due: DateRange {
            from: query.due_from,
            to: query.due_to,
        },
        order: query.order.unwrap_or_default(),
    };

    let rows = state.movements.list(&filter, state.today()).await?;
    let page = PageRequest::from_query(query.page, query.per_page);
    Ok(Json(page.paginate(rows)))
}

/// Parses an optional label parameter, rejecting unknown values.
pub(crate) fn parse_label<T>(
    value: Option<&str>,
    param: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse(v).ok_or_else(|| ApiError::bad_request(format!("Unknown {param}: {v}"))))
        .transpose()
}

/// POST `/movements` - Validate a draft and persist its installments.
async fn create_movement<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CreateMovementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = MovementDraft::from(payload);
    let created = state.movements.create(&draft).await?;

    if let Some(first) = created.first() {
        info!(
            movement_id = %first.id,
            installments = created.len(),
            "Movement created"
        );
    }

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET `/movements/{id}` - Fetch one movement.
async fn get_movement<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<MovementId>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.movements.get(id, state.today()).await?))
}

/// POST `/movements/{id}/pay` - Mark an open movement as paid.
///
/// The body is optional; an empty body settles the movement today.
async fn pay_movement<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<MovementId>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: PayRequest = if body.iter().all(u8::is_ascii_whitespace) {
        PayRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("Invalid pay request: {e}")))?
    };
    let payment_date = request.payment_date.unwrap_or_else(|| state.today());

    let movement = state.movements.mark_paid(id, payment_date).await?;
    info!(movement_id = %id, %payment_date, "Movement marked as paid");

    Ok(Json(movement))
}

/// POST `/movements/{id}/cancel` - Cancel an open movement.
async fn cancel_movement<S: FinanceStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<MovementId>,
) -> Result<impl IntoResponse, ApiError> {
    let movement = state.movements.cancel(id).await?;
    info!(movement_id = %id, "Movement cancelled");

    Ok(Json(movement))
}
