//! Record store error types.

use thiserror::Error;
use uuid::Uuid;

labelled_enum! {
    /// Collections reachable through the record store.
    pub enum Collection {
        /// Customers and suppliers.
        Parties => "parties",
        /// Financial accounts.
        Accounts => "accounts",
        /// Reporting categories.
        Categories => "categories",
        /// Financial movements.
        Movements => "movements",
    }
}

/// Errors raised by a record store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("Record not found in {collection}: {id}")]
    NotFound {
        /// Collection that was searched.
        collection: Collection,
        /// Missing record ID.
        id: Uuid,
    },

    /// A conditional write found the record in an unexpected state.
    #[error("Record in {collection} was changed concurrently: {id}")]
    Conflict {
        /// Collection that was written.
        collection: Collection,
        /// Record ID.
        id: Uuid,
    },

    /// The backend rejected or failed the operation.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A stored row could not be converted into a domain record.
    #[error("Store decode error: {0}")]
    Decode(String),
}

impl StoreError {
    /// Creates a not-found error for `id` in `collection`.
    #[must_use]
    pub fn not_found(collection: Collection, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            collection,
            id: id.into(),
        }
    }

    /// Creates a conflict error for `id` in `collection`.
    #[must_use]
    pub fn conflict(collection: Collection, id: impl Into<Uuid>) -> Self {
        Self::Conflict {
            collection,
            id: id.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Backend(_) => 502,
            Self::Decode(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "STALE_WRITE",
            Self::Backend(_) => "STORE_UNAVAILABLE",
            Self::Decode(_) => "STORE_DECODE_ERROR",
        }
    }
}
