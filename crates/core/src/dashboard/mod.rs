//! Dashboard and report loading.
//!
//! This module loads movements, accounts, and categories through the
//! record store and feeds them to the pure report functions.

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::*;
