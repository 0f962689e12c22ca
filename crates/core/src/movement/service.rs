//! Movement service implementation.

use std::sync::Arc;

use bizdesk_shared::types::{AccountId, MovementId};
use chrono::NaiveDate;

use super::error::{MovementError, StateError};
use super::installments::expand_installments;
use super::status::StatusEngine;
use super::types::{Movement, MovementDraft, MovementStatus, MovementType, MovementView, StatusPatch};
use super::validation::{MovementRules, validate_draft};
use crate::store::{DateRange, FinanceStore, MovementFilter, MovementOrder, StoreError};

/// Read-side movement query, filtering on effective status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementQuery {
    /// Restrict to one movement type.
    pub movement_type: Option<MovementType>,
    /// Restrict to one effective status.
    pub status: Option<MovementStatus>,
    /// Restrict to one owning account.
    pub account_id: Option<AccountId>,
    /// Case-insensitive description substring.
    pub search: Option<String>,
    /// Bounds on the due date.
    pub due: DateRange,
    /// Result ordering.
    pub order: MovementOrder,
}

impl MovementQuery {
    /// Store filter that over-selects on status; pending and overdue rows
    /// are told apart only once `today` is known.
    fn store_filter(&self) -> MovementFilter {
        let statuses = match self.status {
            None => vec![],
            Some(MovementStatus::Pending | MovementStatus::Overdue) => {
                vec![MovementStatus::Pending, MovementStatus::Overdue]
            }
            Some(other) => vec![other],
        };
        MovementFilter {
            movement_type: self.movement_type,
            statuses,
            account_id: self.account_id,
            search: self.search.clone(),
            due: self.due,
            paid: DateRange::unbounded(),
            order: self.order,
        }
    }
}

/// Movement service for creating and settling movements.
pub struct MovementService<S: FinanceStore> {
    store: Arc<S>,
    rules: MovementRules,
}

impl<S: FinanceStore> MovementService<S> {
    /// Create a new movement service.
    #[must_use]
    pub fn new(store: Arc<S>, rules: MovementRules) -> Self {
        Self { store, rules }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the validation limits in force.
    #[must_use]
    pub fn rules(&self) -> &MovementRules {
        &self.rules
    }

    /// Validate a draft, expand it into installments, and insert them in order.
    ///
    /// Installments are inserted one at a time and never rolled back.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The draft fails validation (nothing is written)
    /// - The source or destination account is missing or inactive
    /// - An insert fails, reported as `PartialInsert` with the persisted IDs
    pub async fn create(&self, draft: &MovementDraft) -> Result<Vec<Movement>, MovementError> {
        let validated = validate_draft(draft, &self.rules)?;

        self.require_active_account(validated.account_id).await?;
        if let Some(destination) = validated.destination_account_id {
            self.require_active_account(destination).await?;
        }

        let records = expand_installments(&validated, self.rules.decimal_places)?;
        let total = records.len();
        let mut created: Vec<Movement> = Vec::with_capacity(total);

        for record in records {
            match self.store.insert_movement(record).await {
                Ok(movement) => created.push(movement),
                Err(source) => {
                    return Err(MovementError::PartialInsert {
                        failed_installment: created.len() + 1,
                        persisted: created.iter().map(|m| m.id).collect(),
                        total,
                        source,
                    });
                }
            }
        }

        Ok(created)
    }

    /// Mark an open movement as paid on `payment_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the movement does not exist, is already paid or
    /// cancelled, or the store update fails.
    pub async fn mark_paid(
        &self,
        id: MovementId,
        payment_date: NaiveDate,
    ) -> Result<Movement, MovementError> {
        let movement = self.require_movement(id).await?;
        let patch = StatusEngine::mark_paid(movement.status, payment_date)?;
        self.apply(id, patch).await
    }

    /// Cancel an open movement.
    ///
    /// # Errors
    ///
    /// Returns an error if the movement does not exist, is already paid or
    /// cancelled, or the store update fails.
    pub async fn cancel(&self, id: MovementId) -> Result<Movement, MovementError> {
        let movement = self.require_movement(id).await?;
        let patch = StatusEngine::cancel(movement.status)?;
        self.apply(id, patch).await
    }

    /// List movements with their effective status on `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn list(
        &self,
        query: &MovementQuery,
        today: NaiveDate,
    ) -> Result<Vec<MovementView>, MovementError> {
        let rows = self.store.list_movements(&query.store_filter()).await?;
        Ok(rows
            .into_iter()
            .map(|m| MovementView::at(m, today))
            .filter(|v| query.status.is_none_or(|s| v.effective_status == s))
            .collect())
    }

    /// Fetch one movement with its effective status on `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the movement does not exist or the store fails.
    pub async fn get(&self, id: MovementId, today: NaiveDate) -> Result<MovementView, MovementError> {
        let movement = self.require_movement(id).await?;
        Ok(MovementView::at(movement, today))
    }

    async fn require_movement(&self, id: MovementId) -> Result<Movement, MovementError> {
        self.store
            .find_movement(id)
            .await?
            .ok_or(MovementError::MovementNotFound(id))
    }

    async fn require_active_account(&self, id: AccountId) -> Result<(), MovementError> {
        let account = self
            .store
            .find_account(id)
            .await?
            .ok_or(MovementError::AccountNotFound(id))?;
        if !account.is_active() {
            return Err(MovementError::AccountInactive(id));
        }
        Ok(())
    }

    /// Writes `patch` only if the row still holds a status the transition
    /// may start from. A concurrent settle turns into an invalid
    /// transition from whatever status won.
    async fn apply(&self, id: MovementId, patch: StatusPatch) -> Result<Movement, MovementError> {
        let to = patch.status;
        match self
            .store
            .update_movement_status(id, StatusEngine::sources(to), patch)
            .await
        {
            Ok(movement) => Ok(movement),
            Err(StoreError::NotFound { .. }) => Err(MovementError::MovementNotFound(id)),
            Err(StoreError::Conflict { .. }) => {
                let current = self.require_movement(id).await?;
                Err(StateError::InvalidTransition {
                    from: current.status,
                    to,
                }
                .into())
            }
            Err(other) => Err(MovementError::Store(other)),
        }
    }
}
