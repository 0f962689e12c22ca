//! `SeaORM` entity definitions.

pub mod accounts;
pub mod categories;
pub mod movements;
pub mod parties;
