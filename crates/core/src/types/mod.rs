//! Domain types for the beer inventory.

pub mod beer;
pub mod id;
pub mod sort;
pub mod style;

pub use beer::{
    Beer, BeerInput, MAX_NAME_LEN, MAX_UPC_LEN, SERVER_MANAGED_FIELDS, ValidationMode, fields,
};
pub use id::BeerId;
pub use sort::{BeerSort, BeerSortKey, Direction, SortParseError};
pub use style::{BeerStyle, UnknownBeerStyle};
