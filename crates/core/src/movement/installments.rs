//! Installment expansion.
//!
//! Turns one validated movement into N monthly insert payloads. Due dates
//! are always offset from the first due date, never chained, so a plan
//! starting on the 31st returns to the 31st in long months.

use bizdesk_shared::types::MovementId;

use super::allocation::split_evenly;
use super::error::{FieldError, ValidationErrors};
use super::types::{Installment, MovementStatus, NewMovement, ValidatedMovement};
use crate::calendar::add_months;

/// Expands a validated movement into its installment records.
///
/// Every record is pending with a fresh ID. When the plan has more than
/// one installment, records 2..N point at record 1 as their parent.
///
/// # Errors
///
/// Returns `ValidationErrors` if the installment count is zero or a due
/// date falls outside the supported calendar range.
pub fn expand_installments(
    movement: &ValidatedMovement,
    decimal_places: u32,
) -> Result<Vec<NewMovement>, ValidationErrors> {
    let total = movement.installments;
    if total == 0 {
        return Err(ValidationErrors(vec![FieldError::new(
            "installments",
            "must be at least 1",
        )]));
    }

    let shares = split_evenly(movement.value, total, decimal_places);
    let mut records: Vec<NewMovement> = Vec::with_capacity(shares.len());
    let mut parent = None;

    for (offset, value) in (0..total).zip(shares) {
        let due_date = add_months(movement.due_date, offset).ok_or_else(|| {
            ValidationErrors(vec![FieldError::new(
                "due_date",
                format!("installment {} falls outside the supported range", offset + 1),
            )])
        })?;

        let (description, installment) = if total == 1 {
            (movement.description.clone(), None)
        } else {
            (
                format!("{} ({}/{})", movement.description, offset + 1, total),
                Installment::new(offset + 1, total),
            )
        };

        let id = MovementId::new();
        records.push(NewMovement {
            id,
            movement_type: movement.movement_type,
            description,
            value,
            due_date,
            status: MovementStatus::Pending,
            account_id: movement.account_id,
            destination_account_id: movement.destination_account_id,
            category_id: movement.category_id,
            party_id: movement.party_id,
            installment,
            parent_movement_id: parent,
            notes: movement.notes.clone(),
            payment_method: movement.payment_method.clone(),
            document: movement.document.clone(),
        });

        if total > 1 && parent.is_none() {
            parent = Some(id);
        }
    }

    Ok(records)
}
