//! Database migration command.
//!
//! ```bash
//! brewery-cli migrate
//! ```
//!
//! Migrations live in `crates/web/migrations/` and are embedded at build time.

use super::{CommandError, connect};

/// Apply every pending migration.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing, the connection
/// fails, or a migration does not apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../web/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
