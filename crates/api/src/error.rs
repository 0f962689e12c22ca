//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": CODE, "message": text}`.
//! Validation failures add the offending fields; partial installment
//! inserts add the IDs that were persisted before the failure.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bizdesk_core::movement::MovementError;
use bizdesk_core::reports::ReportError;
use bizdesk_core::store::StoreError;
use bizdesk_shared::AppError;
use serde_json::{Value, json};
use tracing::error;

/// Error returned by route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Movement creation or status change failed.
    Movement(MovementError),
    /// Report input was rejected or could not be loaded.
    Report(ReportError),
    /// A record store call failed.
    Store(StoreError),
    /// Request-level failure outside the finance core.
    App(AppError),
}

impl From<MovementError> for ApiError {
    fn from(err: MovementError) -> Self {
        Self::Movement(err)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self::Report(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl ApiError {
    /// Shorthand for a 400 on a malformed request parameter.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::App(AppError::Validation(message.into()))
    }

    fn status(&self) -> StatusCode {
        let code = match self {
            Self::Movement(e) => e.status_code(),
            Self::Report(e) => e.status_code(),
            Self::Store(e) => e.status_code(),
            Self::App(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn body(&self) -> Value {
        match self {
            Self::Movement(MovementError::Validation(errors)) => json!({
                "error": self.code(),
                "message": errors.to_string(),
                "fields": errors
                    .errors()
                    .iter()
                    .map(|f| json!({ "field": f.field, "reason": f.reason }))
                    .collect::<Vec<_>>(),
            }),
            Self::Movement(MovementError::PartialInsert {
                persisted,
                total,
                failed_installment,
                ..
            }) => json!({
                "error": self.code(),
                "message": self.message(),
                "inserted": persisted,
                "total": total,
                "failed_installment": failed_installment,
            }),
            _ => json!({
                "error": self.code(),
                "message": self.message(),
            }),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Movement(e) => e.error_code(),
            Self::Report(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::App(e) => e.error_code(),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Movement(e) => e.to_string(),
            Self::Report(e) => e.to_string(),
            Self::Store(e) => e.to_string(),
            Self::App(e) => e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.message(), code = self.code(), "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}
