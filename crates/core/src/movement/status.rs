//! Movement status transitions.
//!
//! Transitions are pure: they check the current status and return the
//! patch to write, leaving persistence to the caller.

use chrono::NaiveDate;

use super::error::StateError;
use super::types::{MovementStatus, StatusPatch};

/// Stateless engine for movement status transitions.
pub struct StatusEngine;

impl StatusEngine {
    /// Settles an open movement on `payment_date`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InvalidTransition` unless the movement is
    /// pending (or a stored legacy overdue row).
    pub fn mark_paid(
        current: MovementStatus,
        payment_date: NaiveDate,
    ) -> Result<StatusPatch, StateError> {
        match current {
            MovementStatus::Pending | MovementStatus::Overdue => Ok(StatusPatch {
                status: MovementStatus::Paid,
                payment_date: Some(payment_date),
            }),
            _ => Err(StateError::InvalidTransition {
                from: current,
                to: MovementStatus::Paid,
            }),
        }
    }

    /// Cancels an open movement.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InvalidTransition` unless the movement is
    /// pending (or a stored legacy overdue row).
    pub fn cancel(current: MovementStatus) -> Result<StatusPatch, StateError> {
        match current {
            MovementStatus::Pending | MovementStatus::Overdue => Ok(StatusPatch {
                status: MovementStatus::Cancelled,
                payment_date: None,
            }),
            _ => Err(StateError::InvalidTransition {
                from: current,
                to: MovementStatus::Cancelled,
            }),
        }
    }

    /// Stored statuses a movement may hold for a transition to `to`.
    ///
    /// Pay and cancel both start from pending (or a stored legacy overdue
    /// row). Stores use this list to make the write conditional.
    #[must_use]
    pub const fn sources(to: MovementStatus) -> &'static [MovementStatus] {
        match to {
            MovementStatus::Paid | MovementStatus::Cancelled => {
                &[MovementStatus::Pending, MovementStatus::Overdue]
            }
            MovementStatus::Pending | MovementStatus::Overdue => &[],
        }
    }

    /// Check if a stored status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Paid (mark paid)
    /// - Pending → Cancelled (cancel)
    /// - Overdue → Paid | Cancelled (legacy stored rows)
    #[must_use]
    pub fn is_valid_transition(from: MovementStatus, to: MovementStatus) -> bool {
        Self::sources(to).contains(&from)
    }

    /// Status as seen on `today`: an open movement due before `today`
    /// reads as overdue, anything else keeps its stored status.
    #[must_use]
    pub fn effective_status(
        status: MovementStatus,
        due_date: NaiveDate,
        today: NaiveDate,
    ) -> MovementStatus {
        match status {
            MovementStatus::Pending | MovementStatus::Overdue if due_date < today => {
                MovementStatus::Overdue
            }
            MovementStatus::Overdue => MovementStatus::Pending,
            other => other,
        }
    }
}
