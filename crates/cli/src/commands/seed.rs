//! Seed the `brewery.beer` table with a catalog.
//!
//! The bundled catalog is used unless `--file` names a YAML file of the same
//! shape. Seeding an already populated table is refused unless `--clear` is
//! given, in which case every stored beer is deleted first.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use brewery_web::db::{BeerStore, PgBeerStore};
use brewery_web::seed;

use super::{CommandError, connect};

/// Load a catalog into the database.
///
/// # Errors
///
/// Returns `CommandError` if the catalog is unreadable or invalid, the table
/// is not empty and `clear` is false, or a database operation fails.
pub async fn run(file: Option<&Path>, clear: bool) -> Result<(), CommandError> {
    // Parse before connecting so a bad file fails fast.
    let now = Utc::now();
    let beers = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog from file");
            seed::read_catalog(path, now)?
        }
        None => {
            info!("Loading bundled catalog");
            seed::bundled_catalog(now)?
        }
    };
    info!(beers = beers.len(), "Parsed catalog");

    let store = PgBeerStore::new(connect().await?);

    if clear {
        let removed = store.delete_all().await?;
        info!(removed, "Cleared existing beers");
    } else {
        let existing = store.count().await?;
        if existing > 0 {
            return Err(CommandError::NotEmpty(existing));
        }
    }

    let saved = seed::load(&store, beers).await?;
    info!(saved, "Seeding complete!");
    Ok(())
}
