//! Financial movements.
//!
//! This module implements the movement write path and lifecycle:
//! - Draft validation
//! - Installment expansion with exact value splitting
//! - Status transitions and read-time overdue derivation
//! - The store-backed movement service

pub mod allocation;
pub mod error;
pub mod installments;
pub mod service;
pub mod status;
pub mod types;
pub mod validation;

#[cfg(test)]
mod installments_props;
#[cfg(test)]
mod status_props;

pub use allocation::{minimal_unit, round_to_unit, split_evenly};
pub use error::{FieldError, MovementError, StateError, ValidationErrors};
pub use installments::expand_installments;
pub use service::{MovementQuery, MovementService};
pub use status::StatusEngine;
pub use types::{
    Installment, Movement, MovementDraft, MovementStatus, MovementType, MovementView,
    NewMovement, StatusPatch, ValidatedMovement,
};
pub use validation::{
    MAX_DOCUMENT_LEN, MAX_PAYMENT_METHOD_LEN, MAX_VALUE, MovementRules, validate_draft,
};
