//! Record store adapter.
//!
//! The finance core reads and writes the four collections only through
//! [`FinanceStore`]. The db crate implements it over Postgres. With the
//! `test-util` feature, `InMemoryStore` backs tests without a database.

pub mod error;
pub mod filter;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;

use bizdesk_shared::types::{AccountId, MovementId, PartyId};

use crate::movement::{Movement, MovementStatus, NewMovement, StatusPatch};
use crate::records::{Account, Category, Party, RecordStatus};

pub use error::{Collection, StoreError};
pub use filter::{
    AccountFilter, CategoryFilter, DateRange, MovementFilter, MovementOrder, PartyFilter,
};
#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryStore;

/// Repository trait for parties, accounts, categories, and movements.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait FinanceStore: Send + Sync {
    /// List movements matching `filter`, in the filter's order.
    fn list_movements(
        &self,
        filter: &MovementFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Movement>, StoreError>> + Send;

    /// Find a movement by ID.
    fn find_movement(
        &self,
        id: MovementId,
    ) -> impl std::future::Future<Output = Result<Option<Movement>, StoreError>> + Send;

    /// Insert one movement and return the stored row.
    fn insert_movement(
        &self,
        movement: NewMovement,
    ) -> impl std::future::Future<Output = Result<Movement, StoreError>> + Send;

    /// Write a status patch if the stored status is one of `expected`,
    /// and return the updated row.
    ///
    /// The status check and the write are one atomic step. Fails with
    /// `StoreError::NotFound` if the movement does not exist, or
    /// `StoreError::Conflict` if its status is not in `expected`.
    fn update_movement_status(
        &self,
        id: MovementId,
        expected: &[MovementStatus],
        patch: StatusPatch,
    ) -> impl std::future::Future<Output = Result<Movement, StoreError>> + Send;

    /// List accounts matching `filter`, ordered by name.
    fn list_accounts(
        &self,
        filter: &AccountFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Account>, StoreError>> + Send;

    /// Find an account by ID.
    fn find_account(
        &self,
        id: AccountId,
    ) -> impl std::future::Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// List categories matching `filter`, ordered by name.
    fn list_categories(
        &self,
        filter: &CategoryFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Category>, StoreError>> + Send;

    /// List parties matching `filter`, ordered by name.
    fn list_parties(
        &self,
        filter: &PartyFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Party>, StoreError>> + Send;

    /// Set a party's status and return the updated row.
    ///
    /// Fails with `StoreError::NotFound` if the party does not exist.
    fn update_party_status(
        &self,
        id: PartyId,
        status: RecordStatus,
    ) -> impl std::future::Future<Output = Result<Party, StoreError>> + Send;

    /// Hard-delete a party.
    ///
    /// Fails with `StoreError::NotFound` if the party does not exist.
    fn delete_party(
        &self,
        id: PartyId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
