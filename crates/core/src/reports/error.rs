//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid period: end {end} is before start {start}")]
    InvalidPeriod {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Requested series length is out of range.
    #[error("Invalid number of months: {requested} (expected 1 to {max})")]
    InvalidMonths {
        /// Requested length.
        requested: u32,
        /// Largest accepted length.
        max: u32,
    },

    /// Loading report input failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReportError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPeriod { .. } | Self::InvalidMonths { .. } => 400,
            Self::Store(e) => e.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::InvalidMonths { .. } => "INVALID_MONTHS",
            Self::Store(e) => e.error_code(),
        }
    }
}
