//! Database migration runner for Bizdesk.
//!
//! Usage:
//!   migrator up      - Apply the finance schema
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The connection string comes from `DATABASE_URL`. The server reads the
//! same variable when `BIZDESK__DATABASE__URL` is unset, so one entry in
//! `.env` serves both binaries.

use sea_orm_migration::prelude::*;
use bizdesk_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // run_cli installs its own tracing subscriber
    cli::run_cli(Migrator).await;
}
