//! Movement domain types.
//!
//! A movement is a single scheduled income, expense, or transfer. Drafts
//! arrive as raw form input, become [`ValidatedMovement`] after validation,
//! fan out into one or more [`NewMovement`] insert payloads, and come back
//! from the store as [`Movement`] rows.

use bizdesk_shared::types::{AccountId, CategoryId, MovementId, PartyId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

labelled_enum! {
    /// Direction of a movement.
    pub enum MovementType {
        /// Money coming in (receivable until paid).
        Income => "income" | "receita",
        /// Money going out (payable until paid).
        Expense => "expense" | "despesa",
        /// Money moved between two owned accounts.
        Transfer => "transfer" | "transferencia",
    }
}

labelled_enum! {
    /// Lifecycle status of a movement.
    ///
    /// `Overdue` is normally derived at read time; it only appears as a
    /// stored value on legacy rows, where it behaves like `Pending`.
    pub enum MovementStatus {
        /// Scheduled, not yet settled.
        Pending => "pending" | "pendente",
        /// Settled on its payment date (terminal).
        Paid => "paid" | "pago",
        /// Abandoned (terminal).
        Cancelled => "cancelled" | "cancelado" | "canceled",
        /// Pending with a due date in the past.
        Overdue => "overdue" | "vencido" | "atrasado",
    }
}

impl MovementStatus {
    /// Returns true if no further transition is defined.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Returns true if the movement still awaits settlement.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }
}

/// Position of a movement within an installment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based position.
    pub index: u32,
    /// Number of installments in the plan.
    pub total: u32,
}

impl Installment {
    /// Creates an installment position, enforcing `1 <= index <= total`.
    #[must_use]
    pub fn new(index: u32, total: u32) -> Option<Self> {
        (index >= 1 && index <= total).then_some(Self { index, total })
    }
}

/// A persisted movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Movement ID.
    pub id: MovementId,
    /// Income, expense, or transfer.
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    /// Free-text label.
    pub description: String,
    /// Positive amount.
    pub value: Decimal,
    /// Scheduled date.
    pub due_date: NaiveDate,
    /// Settlement date, set only while paid.
    pub payment_date: Option<NaiveDate>,
    /// Stored status.
    pub status: MovementStatus,
    /// Owning account.
    pub account_id: AccountId,
    /// Destination for transfers.
    pub destination_account_id: Option<AccountId>,
    /// Reporting category.
    pub category_id: Option<CategoryId>,
    /// Customer or supplier.
    pub party_id: Option<PartyId>,
    /// Position within an installment plan.
    pub installment: Option<Installment>,
    /// First installment of the plan this row belongs to.
    pub parent_movement_id: Option<MovementId>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// How the movement is settled (pix, boleto, card...).
    pub payment_method: Option<String>,
    /// External document reference.
    pub document: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Movement {
    /// Status as shown to users on `today`: pending rows past their due
    /// date read as overdue.
    #[must_use]
    pub fn effective_status(&self, today: NaiveDate) -> MovementStatus {
        crate::movement::status::StatusEngine::effective_status(self.status, self.due_date, today)
    }

    /// Returns true if the movement reads as overdue on `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.effective_status(today) == MovementStatus::Overdue
    }

    /// Applies a status patch produced by the status engine.
    pub fn apply(&mut self, patch: StatusPatch, at: DateTime<Utc>) {
        self.status = patch.status;
        self.payment_date = patch.payment_date;
        self.updated_at = at;
    }
}

/// Insert payload for one movement, with its identifier already assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    /// Movement ID.
    pub id: MovementId,
    /// Income, expense, or transfer.
    pub movement_type: MovementType,
    /// Label, including the installment suffix when split.
    pub description: String,
    /// This record's share of the draft value.
    pub value: Decimal,
    /// Scheduled date.
    pub due_date: NaiveDate,
    /// Always `Pending` for new rows.
    pub status: MovementStatus,
    /// Owning account.
    pub account_id: AccountId,
    /// Destination for transfers.
    pub destination_account_id: Option<AccountId>,
    /// Reporting category.
    pub category_id: Option<CategoryId>,
    /// Customer or supplier.
    pub party_id: Option<PartyId>,
    /// Position within an installment plan.
    pub installment: Option<Installment>,
    /// First installment of the plan.
    pub parent_movement_id: Option<MovementId>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Settlement method.
    pub payment_method: Option<String>,
    /// External document reference.
    pub document: Option<String>,
}

impl NewMovement {
    /// Builds the stored row with store-assigned timestamps.
    #[must_use]
    pub fn into_movement(self, created_at: DateTime<Utc>) -> Movement {
        Movement {
            id: self.id,
            movement_type: self.movement_type,
            description: self.description,
            value: self.value,
            due_date: self.due_date,
            payment_date: None,
            status: self.status,
            account_id: self.account_id,
            destination_account_id: self.destination_account_id,
            category_id: self.category_id,
            party_id: self.party_id,
            installment: self.installment,
            parent_movement_id: self.parent_movement_id,
            notes: self.notes,
            payment_method: self.payment_method,
            document: self.document,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Partial update written by a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    /// New stored status.
    pub status: MovementStatus,
    /// New payment date (`Some` iff `status` is `Paid`).
    pub payment_date: Option<NaiveDate>,
}

/// Raw movement form input, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    /// Movement type label.
    pub movement_type: String,
    /// Free-text label.
    pub description: String,
    /// Amount as typed.
    pub value: String,
    /// Due date as typed (`YYYY-MM-DD`).
    pub due_date: String,
    /// Owning account.
    pub account_id: Option<AccountId>,
    /// Destination for transfers.
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
    /// Number of monthly installments.
    pub installments: u32,
}

impl Default for MovementDraft {
    fn default() -> Self {
        Self {
            movement_type: String::new(),
            description: String::new(),
            value: String::new(),
            due_date: String::new(),
            account_id: None,
            destination_account_id: None,
            category_id: None,
            party_id: None,
            notes: None,
            payment_method: None,
            document: None,
            installments: 1,
        }
    }
}

/// A draft that passed validation, with typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMovement {
    /// Income, expense, or transfer.
    pub movement_type: MovementType,
    /// Trimmed label.
    pub description: String,
    /// Total amount, strictly positive.
    pub value: Decimal,
    /// Due date of the first installment.
    pub due_date: NaiveDate,
    /// Owning account.
    pub account_id: AccountId,
    /// Destination for transfers.
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
    /// Number of monthly installments, at least 1.
    pub installments: u32,
}

/// A movement together with its status as of a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementView {
    /// The stored movement.
    #[serde(flatten)]
    pub movement: Movement,
    /// Stored status with overdue derived.
    pub effective_status: MovementStatus,
}

impl MovementView {
    /// Derives the effective status of `movement` on `today`.
    #[must_use]
    pub fn at(movement: Movement, today: NaiveDate) -> Self {
        let effective_status = movement.effective_status(today);
        Self {
            movement,
            effective_status,
        }
    }
}
