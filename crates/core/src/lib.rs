//! Core finance logic for Bizdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the [`store::FinanceStore`] trait, which the
//! db crate implements.
//!
//! # Modules
//!
//! - `movement` - Movement validation, installment expansion, and status lifecycle
//! - `records` - Accounts, categories, and parties referenced by movements
//! - `store` - Record store adapter trait, filters, and an in-memory store
//! - `reports` - Pure aggregation over movement collections
//! - `dashboard` - Store-backed dashboard and report loading
//! - `calendar` - Calendar-month arithmetic and half-open periods

#[macro_use]
mod label;

pub mod calendar;
pub mod dashboard;
pub mod movement;
pub mod records;
pub mod reports;
pub mod store;
