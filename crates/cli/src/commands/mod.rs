//! CLI command implementations.

pub mod migrate;
pub mod seed;

use brewery_web::config::{ConfigError, require_database_url};
use brewery_web::db::{self, RepositoryError};
use brewery_web::seed::SeedError;
use sqlx::PgPool;

/// Environment variable naming the database.
pub const DATABASE_URL_VAR: &str = "BREWERY_DATABASE_URL";

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error("Refusing to seed: {0} beers already stored (pass --clear to replace them)")]
    NotEmpty(u64),
}

/// Connect to the configured database.
async fn connect() -> Result<PgPool, CommandError> {
    let database_url = require_database_url(DATABASE_URL_VAR)?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
