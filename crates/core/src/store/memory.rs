//! In-memory record store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use bizdesk_shared::types::{AccountId, CategoryId, MovementId, PartyId};
use chrono::Utc;

use super::error::{Collection, StoreError};
use super::filter::{AccountFilter, CategoryFilter, MovementFilter, PartyFilter};
use super::FinanceStore;
use crate::movement::{Movement, MovementStatus, NewMovement, StatusPatch};
use crate::records::{Account, Category, Party, RecordStatus};

#[derive(Debug, Default)]
struct Collections {
    movements: HashMap<MovementId, Movement>,
    accounts: HashMap<AccountId, Account>,
    categories: HashMap<CategoryId, Category>,
    parties: HashMap<PartyId, Party>,
    inserts_left: Option<usize>,
}

/// A [`FinanceStore`] held entirely in memory.
///
/// Insert failures can be injected with
/// [`fail_inserts_after`](Self::fail_inserts_after) to exercise partial
/// installment writes.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Collections>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or replaces an account.
    pub fn put_account(&self, account: Account) {
        self.lock().accounts.insert(account.id, account);
    }

    /// Adds or replaces a category.
    pub fn put_category(&self, category: Category) {
        self.lock().categories.insert(category.id, category);
    }

    /// Adds or replaces a party.
    pub fn put_party(&self, party: Party) {
        self.lock().parties.insert(party.id, party);
    }

    /// Adds or replaces a movement as stored, bypassing insert rules.
    pub fn put_movement(&self, movement: Movement) {
        self.lock().movements.insert(movement.id, movement);
    }

    /// Allows `count` more successful inserts, then fails every insert
    /// with a backend error.
    pub fn fail_inserts_after(&self, count: usize) {
        self.lock().inserts_left = Some(count);
    }

    /// Number of stored movements.
    #[must_use]
    pub fn movement_count(&self) -> usize {
        self.lock().movements.len()
    }

    /// Snapshot of every stored movement, due date ascending.
    #[must_use]
    pub fn movements(&self) -> Vec<Movement> {
        let mut rows: Vec<_> = self.lock().movements.values().cloned().collect();
        super::MovementOrder::DueDateAsc.sort(&mut rows);
        rows
    }
}

impl FinanceStore for InMemoryStore {
    async fn list_movements(&self, filter: &MovementFilter) -> Result<Vec<Movement>, StoreError> {
        let mut rows: Vec<_> = self
            .lock()
            .movements
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        filter.order.sort(&mut rows);
        Ok(rows)
    }

    async fn find_movement(&self, id: MovementId) -> Result<Option<Movement>, StoreError> {
        Ok(self.lock().movements.get(&id).cloned())
    }

    async fn insert_movement(&self, movement: NewMovement) -> Result<Movement, StoreError> {
        let mut inner = self.lock();
        if let Some(left) = inner.inserts_left.as_mut() {
            if *left == 0 {
                return Err(StoreError::Backend("insert rejected".to_string()));
            }
            *left -= 1;
        }
        let stored = movement.into_movement(Utc::now());
        inner.movements.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_movement_status(
        &self,
        id: MovementId,
        expected: &[MovementStatus],
        patch: StatusPatch,
    ) -> Result<Movement, StoreError> {
        let mut inner = self.lock();
        let movement = inner
            .movements
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(Collection::Movements, id))?;
        if !expected.contains(&movement.status) {
            return Err(StoreError::conflict(Collection::Movements, id));
        }
        movement.apply(patch, Utc::now());
        Ok(movement.clone())
    }

    async fn list_accounts(&self, filter: &AccountFilter) -> Result<Vec<Account>, StoreError> {
        let mut rows: Vec<Account> = self
            .lock()
            .accounts
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        rows.sort_by(|x, y| x.name.cmp(&y.name));
        Ok(rows)
    }

    async fn find_account(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        Ok(self.lock().accounts.get(&id).cloned())
    }

    async fn list_categories(&self, filter: &CategoryFilter) -> Result<Vec<Category>, StoreError> {
        let mut rows: Vec<Category> = self
            .lock()
            .categories
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        rows.sort_by(|x, y| x.name.cmp(&y.name));
        Ok(rows)
    }

    async fn list_parties(&self, filter: &PartyFilter) -> Result<Vec<Party>, StoreError> {
        let mut rows: Vec<Party> = self
            .lock()
            .parties
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        rows.sort_by(|x, y| x.name.cmp(&y.name));
        Ok(rows)
    }

    async fn update_party_status(
        &self,
        id: PartyId,
        status: RecordStatus,
    ) -> Result<Party, StoreError> {
        let mut inner = self.lock();
        let party = inner
            .parties
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(Collection::Parties, id))?;
        party.status = status;
        Ok(party.clone())
    }

    async fn delete_party(&self, id: PartyId) -> Result<(), StoreError> {
        self.lock()
            .parties
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(Collection::Parties, id))
    }
}
