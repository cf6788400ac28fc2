//! Beer record storage.
//!
//! # Stores
//!
//! - [`PgBeerStore`] - `PostgreSQL` table `brewery.beer`
//! - [`InMemoryBeerStore`] - process-local, used when no database is configured
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p brewery-cli -- migrate
//! ```

pub mod beers;
pub mod memory;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use brewery_core::{Beer, BeerId, BeerSort, Page, PageRequest, Pageable};

use crate::config::StorageConfig;
use crate::seed;

pub use beers::PgBeerStore;
pub use memory::InMemoryBeerStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Persistence for beer records.
///
/// Listings without an explicit sort come back in insertion order
/// (created timestamp, then identifier).
#[async_trait]
pub trait BeerStore: Send + Sync {
    /// Look up one beer.
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError>;

    /// One page of all beers, optionally sorted.
    async fn find_all(
        &self,
        request: PageRequest,
        sort: Option<BeerSort>,
    ) -> Result<Page<Beer>, RepositoryError>;

    /// Beers whose name equals `name` exactly.
    async fn find_all_by_name(
        &self,
        name: &str,
        pageable: Pageable,
    ) -> Result<Page<Beer>, RepositoryError>;

    /// Insert a beer with a new identifier, or update the stored one.
    ///
    /// An update keeps the stored `created_date` and stamps
    /// `last_modified_date` with the current instant. Returns the record as
    /// stored.
    async fn save(&self, beer: Beer) -> Result<Beer, RepositoryError>;

    /// Remove a beer. Absent identifiers are not an error.
    async fn delete_by_id(&self, id: BeerId) -> Result<(), RepositoryError>;

    /// Number of stored beers.
    async fn count(&self) -> Result<u64, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Build the store selected by `storage`.
///
/// The in-memory store is seeded with the bundled catalog when requested;
/// `PostgreSQL` is used as-is (seed it with `brewery-cli seed`).
///
/// # Errors
///
/// Returns `RepositoryError` if the pool cannot connect or seeding fails.
pub async fn connect_store(storage: &StorageConfig) -> Result<Arc<dyn BeerStore>, RepositoryError> {
    match storage {
        StorageConfig::Postgres { database_url } => {
            let pool = create_pool(database_url).await?;
            tracing::info!("Database pool created");
            Ok(Arc::new(PgBeerStore::new(pool)))
        }
        StorageConfig::InMemory { seed_demo_data } => {
            let store = InMemoryBeerStore::new();
            if *seed_demo_data {
                let beers = seed::bundled_catalog(Utc::now())
                    .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;
                let saved = seed::load(&store, beers).await?;
                tracing::info!(count = saved, "Seeded in-memory store with demo catalog");
            }
            Ok(Arc::new(store))
        }
    }
}
