//! Migrate CLI: `migration up`, `migration down`, `migration fresh`, `migration status`.
//!
//! Reads `DATABASE_URL` (or `-u <url>`) and applies the SSO schema.
use sea_orm_migration::prelude::*;

#[async_std::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
