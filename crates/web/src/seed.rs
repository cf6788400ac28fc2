//! Beer catalog seeding.
//!
//! A catalog is a YAML list of beers:
//!
//! ```yaml
//! - beerName: Adjunct Trail
//!   beerStyle: STOUT
//!   upc: "8380495518610"
//!   price: "11.25"
//!   quantityOnHand: 240   # optional, random when omitted
//! ```

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;

use brewery_core::{Beer, BeerInput, ValidationErrors};

use crate::db::{BeerStore, RepositoryError};

/// The catalog shipped with the service.
pub const BUNDLED_CATALOG: &str = include_str!("../data/beers.yaml");

/// Errors reading a catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid catalog entry #{index}: {errors}")]
    Invalid {
        index: usize,
        errors: ValidationErrors,
    },
}

/// Parse the bundled catalog.
///
/// # Errors
///
/// Returns `SeedError` if the bundled YAML is malformed.
pub fn bundled_catalog(now: DateTime<Utc>) -> Result<Vec<Beer>, SeedError> {
    parse_catalog(BUNDLED_CATALOG, now)
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or is malformed.
pub fn read_catalog(path: &Path, now: DateTime<Utc>) -> Result<Vec<Beer>, SeedError> {
    let yaml = std::fs::read_to_string(path)?;
    parse_catalog(&yaml, now)
}

/// Parse a YAML catalog into new beers.
///
/// Entries keep their file order: created timestamps step up by one
/// millisecond per entry, ending at `now`. Missing quantities are drawn at
/// random.
///
/// # Errors
///
/// Returns `SeedError::Invalid` for the first entry that fails validation.
pub fn parse_catalog(yaml: &str, now: DateTime<Utc>) -> Result<Vec<Beer>, SeedError> {
    let entries: Vec<BeerInput> = serde_yaml::from_str(yaml)?;
    let mut rng = rand::rng();
    let count = i64::try_from(entries.len()).unwrap_or(i64::MAX);

    entries
        .into_iter()
        .enumerate()
        .map(|(index, mut entry)| {
            if entry.quantity_on_hand.is_none() {
                entry.quantity_on_hand = Some(rng.random_range(1..=500));
            }

            let offset = count - i64::try_from(index).unwrap_or(count) - 1;
            entry
                .into_new_beer(now - Duration::milliseconds(offset))
                .map_err(|errors| SeedError::Invalid { index, errors })
        })
        .collect()
}

/// Save every beer into `store`, returning how many were saved.
///
/// # Errors
///
/// Returns `RepositoryError` on the first failed save.
pub async fn load(store: &dyn BeerStore, beers: Vec<Beer>) -> Result<usize, RepositoryError> {
    let mut saved = 0;
    for beer in beers {
        store.save(beer).await?;
        saved += 1;
    }
    Ok(saved)
}
