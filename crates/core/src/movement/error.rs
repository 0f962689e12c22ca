//! Movement error types.
//!
//! Validation and state errors are raised before any store write. Store
//! failures while inserting installments are reported with how many rows
//! were persisted, since earlier inserts are never rolled back.

use bizdesk_shared::types::{AccountId, MovementId};
use serde::Serialize;
use thiserror::Error;

use crate::movement::types::MovementStatus;
use crate::store::StoreError;

/// A single rejected draft field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Draft field name.
    pub field: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Every violation found in a draft, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid movement: {}", summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Returns the violations.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns true if `field` has at least one violation.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Rejected status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// The transition is not defined from the current status.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: MovementStatus,
        /// The attempted target status.
        to: MovementStatus,
    },
}

/// Errors raised by the movement service.
#[derive(Debug, Error)]
pub enum MovementError {
    /// The draft failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The status transition is not allowed.
    #[error(transparent)]
    State(#[from] StateError),

    /// The referenced account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The referenced account is inactive.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// The movement does not exist.
    #[error("Movement not found: {0}")]
    MovementNotFound(MovementId),

    /// An installment insert failed; earlier installments stay persisted.
    #[error(
        "Installment {failed_installment} of {total} failed after {} succeeded: {source}",
        .persisted.len()
    )]
    PartialInsert {
        /// IDs of installments persisted before the failure, in order.
        persisted: Vec<MovementId>,
        /// Number of installments in the plan.
        total: usize,
        /// 1-based index of the installment that failed.
        failed_installment: usize,
        /// The store failure.
        #[source]
        source: StoreError,
    },

    /// A store read or update failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MovementError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::State(_) => 409,
            Self::AccountNotFound(_) | Self::AccountInactive(_) => 400,
            Self::MovementNotFound(_) => 404,
            Self::PartialInsert { .. } => 502,
            Self::Store(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::State(_) => "INVALID_TRANSITION",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::MovementNotFound(_) => "MOVEMENT_NOT_FOUND",
            Self::PartialInsert { .. } => "PARTIAL_INSERT",
            Self::Store(e) => e.error_code(),
        }
    }
}
