//! Financial report aggregation.
//!
//! This module provides pure aggregation over movement collections:
//! - Period totals (income, expense, profit)
//! - Outstanding receivables and payables
//! - Monthly series and running balance
//! - Expense breakdown by category
//! - Dashboard overview

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
