//! Movement draft validation.
//!
//! Every check runs in a fixed order and all violations are collected, so
//! callers can show each offending field at once.

use std::str::FromStr;

use bizdesk_shared::FinanceConfig;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::allocation::{minimal_unit, round_to_unit};
use super::error::{FieldError, ValidationErrors};
use super::types::{MovementDraft, MovementType, ValidatedMovement};

/// Largest amount a stored money column holds (`NUMERIC(18, 4)`).
pub const MAX_VALUE: Decimal = Decimal::from_parts(0xA763_FFFF, 0x0DE0_B6B3, 0, false, 4);

/// Longest stored payment method.
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;

/// Longest stored document reference.
pub const MAX_DOCUMENT_LEN: usize = 100;

/// Limits applied when validating drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementRules {
    /// Largest accepted installment count.
    pub max_installments: u32,
    /// Decimal places of the minimal currency unit.
    pub decimal_places: u32,
    /// Largest accepted total value.
    pub max_value: Decimal,
    /// Longest accepted payment method, in characters.
    pub max_payment_method_len: usize,
    /// Longest accepted document reference, in characters.
    pub max_document_len: usize,
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            max_installments: 120,
            decimal_places: 2,
            max_value: MAX_VALUE,
            max_payment_method_len: MAX_PAYMENT_METHOD_LEN,
            max_document_len: MAX_DOCUMENT_LEN,
        }
    }
}

impl MovementRules {
    /// Reads the limits from the finance configuration section.
    #[must_use]
    pub fn from_config(config: &FinanceConfig) -> Self {
        Self {
            max_installments: config.max_installments,
            decimal_places: config.decimal_places,
            ..Self::default()
        }
    }
}

/// Validates a raw draft into typed fields.
///
/// # Errors
///
/// Returns `ValidationErrors` listing every violated rule in check order.
pub fn validate_draft(
    draft: &MovementDraft,
    rules: &MovementRules,
) -> Result<ValidatedMovement, ValidationErrors> {
    let mut errors = Vec::new();

    let movement_type = MovementType::parse(&draft.movement_type);
    if movement_type.is_none() {
        errors.push(FieldError::new(
            "type",
            format!("unknown movement type '{}'", draft.movement_type.trim()),
        ));
    }

    let description = draft.description.trim();
    if description.is_empty() {
        errors.push(FieldError::new("description", "is required"));
    }

    let value = match Decimal::from_str(draft.value.trim()) {
        Ok(v) if v <= Decimal::ZERO => {
            errors.push(FieldError::new("value", "must be greater than zero"));
            None
        }
        Ok(v) if round_to_unit(v, rules.decimal_places) > rules.max_value => {
            errors.push(FieldError::new(
                "value",
                format!("must be at most {}", rules.max_value),
            ));
            None
        }
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(FieldError::new("value", "is not a valid number"));
            None
        }
    };

    let due_date = match NaiveDate::parse_from_str(draft.due_date.trim(), "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(FieldError::new("due_date", "must be a date in YYYY-MM-DD format"));
            None
        }
    };

    if draft.account_id.is_none() {
        errors.push(FieldError::new("account_id", "is required"));
    }

    let installments_ok = (1..=rules.max_installments).contains(&draft.installments);
    if !installments_ok {
        errors.push(FieldError::new(
            "installments",
            format!("must be between 1 and {}", rules.max_installments),
        ));
    }

    if movement_type == Some(MovementType::Transfer) {
        match draft.destination_account_id {
            None => errors.push(FieldError::new(
                "destination_account_id",
                "is required for transfers",
            )),
            Some(dest) if Some(dest) == draft.account_id => errors.push(FieldError::new(
                "destination_account_id",
                "must differ from the source account",
            )),
            Some(_) => {}
        }
    }

    let payment_method = non_blank(draft.payment_method.as_deref());
    check_length(
        &mut errors,
        "payment_method",
        payment_method.as_deref(),
        rules.max_payment_method_len,
    );
    let document = non_blank(draft.document.as_deref());
    check_length(&mut errors, "document", document.as_deref(), rules.max_document_len);

    // Every installment must receive at least one minimal unit.
    if let Some(v) = value
        && installments_ok
    {
        let floor = minimal_unit(rules.decimal_places) * Decimal::from(draft.installments);
        if round_to_unit(v, rules.decimal_places) < floor {
            errors.push(FieldError::new(
                "value",
                format!("is too small to split into {} installments", draft.installments),
            ));
        }
    }

    match (movement_type, value, due_date, draft.account_id) {
        (Some(movement_type), Some(value), Some(due_date), Some(account_id)) if errors.is_empty() => {
            Ok(ValidatedMovement {
                movement_type,
                description: description.to_string(),
                value,
                due_date,
                account_id,
                destination_account_id: draft.destination_account_id,
                category_id: draft.category_id,
                party_id: draft.party_id,
                notes: non_blank(draft.notes.as_deref()),
                payment_method,
                document,
                installments: draft.installments,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<&str>,
    max: usize,
) {
    if value.is_some_and(|v| v.chars().count() > max) {
        errors.push(FieldError::new(field, format!("must be at most {max} characters")));
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
