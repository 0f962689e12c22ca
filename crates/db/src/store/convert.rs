//! Conversions between stored rows and domain records.

use bizdesk_core::movement::{Installment, Movement, MovementStatus, MovementType, NewMovement};
use bizdesk_core::records::{
    Account, AccountKind, Category, CategoryType, Party, PartyKind, RecordStatus,
};
use bizdesk_core::store::StoreError;
use bizdesk_shared::types::{AccountId, CategoryId, MovementId, PartyId};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::entities::{accounts, categories, movements, parties};

fn label<T>(parse: fn(&str) -> Option<T>, column: &str, raw: &str) -> Result<T, StoreError> {
    parse(raw).ok_or_else(|| StoreError::Decode(format!("{column}: unknown label '{raw}'")))
}

fn utc(at: DateTimeWithTimeZone) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

fn installment(index: Option<i32>, total: Option<i32>) -> Result<Option<Installment>, StoreError> {
    match (index, total) {
        (None, None) => Ok(None),
        (Some(i), Some(t)) => u32::try_from(i)
            .ok()
            .zip(u32::try_from(t).ok())
            .and_then(|(i, t)| Installment::new(i, t))
            .map(Some)
            .ok_or_else(|| StoreError::Decode(format!("movements: invalid installment {i}/{t}"))),
        _ => Err(StoreError::Decode(
            "movements: installment index and total must be set together".to_string(),
        )),
    }
}

/// Converts a movement row.
pub(crate) fn movement_from_model(row: movements::Model) -> Result<Movement, StoreError> {
    Ok(Movement {
        id: MovementId::from_uuid(row.id),
        movement_type: label(MovementType::parse, "movements.movement_type", &row.movement_type)?,
        description: row.description,
        value: row.value,
        due_date: row.due_date,
        payment_date: row.payment_date,
        status: label(MovementStatus::parse, "movements.status", &row.status)?,
        account_id: AccountId::from_uuid(row.account_id),
        destination_account_id: row.destination_account_id.map(AccountId::from_uuid),
        category_id: row.category_id.map(CategoryId::from_uuid),
        party_id: row.party_id.map(PartyId::from_uuid),
        installment: installment(row.installment_index, row.installment_total)?,
        parent_movement_id: row.parent_movement_id.map(MovementId::from_uuid),
        notes: row.notes,
        payment_method: row.payment_method,
        document: row.document,
        created_at: utc(row.created_at),
        updated_at: utc(row.updated_at),
    })
}

/// Builds the insert model for a new movement.
pub(crate) fn movement_to_active(
    movement: NewMovement,
    now: DateTime<Utc>,
) -> Result<movements::ActiveModel, StoreError> {
    let position = |n: u32| {
        i32::try_from(n)
            .map_err(|_| StoreError::Backend(format!("installment position {n} out of range")))
    };
    let (index, total) = match movement.installment {
        Some(i) => (Some(position(i.index)?), Some(position(i.total)?)),
        None => (None, None),
    };
    let now: DateTimeWithTimeZone = now.into();

    Ok(movements::ActiveModel {
        id: Set(movement.id.into_inner()),
        movement_type: Set(movement.movement_type.as_str().to_string()),
        description: Set(movement.description),
        value: Set(movement.value),
        due_date: Set(movement.due_date),
        payment_date: Set(None),
        status: Set(movement.status.as_str().to_string()),
        account_id: Set(movement.account_id.into_inner()),
        destination_account_id: Set(movement.destination_account_id.map(AccountId::into_inner)),
        category_id: Set(movement.category_id.map(CategoryId::into_inner)),
        party_id: Set(movement.party_id.map(PartyId::into_inner)),
        installment_index: Set(index),
        installment_total: Set(total),
        parent_movement_id: Set(movement.parent_movement_id.map(MovementId::into_inner)),
        notes: Set(movement.notes),
        payment_method: Set(movement.payment_method),
        document: Set(movement.document),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

/// Converts an account row.
pub(crate) fn account_from_model(row: accounts::Model) -> Result<Account, StoreError> {
    Ok(Account {
        id: AccountId::from_uuid(row.id),
        name: row.name,
        kind: label(AccountKind::parse, "accounts.kind", &row.kind)?,
        current_balance: row.current_balance,
        initial_balance: row.initial_balance,
        status: label(RecordStatus::parse, "accounts.status", &row.status)?,
        bank_name: row.bank_name,
        branch: row.branch,
        account_number: row.account_number,
    })
}

/// Converts a category row.
pub(crate) fn category_from_model(row: categories::Model) -> Result<Category, StoreError> {
    Ok(Category {
        id: CategoryId::from_uuid(row.id),
        name: row.name,
        category_type: label(CategoryType::parse, "categories.category_type", &row.category_type)?,
        status: label(RecordStatus::parse, "categories.status", &row.status)?,
        description: row.description,
    })
}

/// Converts a party row.
pub(crate) fn party_from_model(row: parties::Model) -> Result<Party, StoreError> {
    Ok(Party {
        id: PartyId::from_uuid(row.id),
        name: row.name,
        kind: label(PartyKind::parse, "parties.kind", &row.kind)?,
        status: label(RecordStatus::parse, "parties.status", &row.status)?,
        email: row.email,
        phone: row.phone,
        tax_id: row.tax_id,
        address: row.address,
        city: row.city,
        state: row.state,
        postal_code: row.postal_code,
        notes: row.notes,
    })
}
