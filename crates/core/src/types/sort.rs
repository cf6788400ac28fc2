//! Sort orders for beer listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::{Beer, fields};

/// Errors parsing a `property,direction` sort expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortParseError {
    #[error("unknown sort property: {0}")]
    UnknownProperty(String),

    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Lower-case keyword, `asc` or `desc`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for Direction {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(SortParseError::UnknownDirection(s.to_string())),
        }
    }
}

/// Sortable beer property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeerSortKey {
    BeerName,
    BeerStyle,
    Upc,
    QuantityOnHand,
    Price,
    CreatedDate,
    LastModifiedDate,
}

impl BeerSortKey {
    /// Payload property name, e.g. `beerName`.
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::BeerName => fields::BEER_NAME,
            Self::BeerStyle => fields::BEER_STYLE,
            Self::Upc => fields::UPC,
            Self::QuantityOnHand => fields::QUANTITY_ON_HAND,
            Self::Price => fields::PRICE,
            Self::CreatedDate => fields::CREATED_DATE,
            Self::LastModifiedDate => fields::LAST_MODIFIED_DATE,
        }
    }
}

impl FromStr for BeerSortKey {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            fields::BEER_NAME => Ok(Self::BeerName),
            fields::BEER_STYLE => Ok(Self::BeerStyle),
            fields::UPC => Ok(Self::Upc),
            fields::QUANTITY_ON_HAND => Ok(Self::QuantityOnHand),
            fields::PRICE => Ok(Self::Price),
            fields::CREATED_DATE => Ok(Self::CreatedDate),
            fields::LAST_MODIFIED_DATE => Ok(Self::LastModifiedDate),
            other => Err(SortParseError::UnknownProperty(other.to_string())),
        }
    }
}

/// A single-property sort, e.g. `beerName,desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeerSort {
    pub key: BeerSortKey,
    pub direction: Direction,
}

impl BeerSort {
    #[must_use]
    pub const fn new(key: BeerSortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    /// Compare two beers on this sort's property and direction.
    ///
    /// Ties are `Equal`; callers break them by insertion order.
    #[must_use]
    pub fn compare(&self, a: &Beer, b: &Beer) -> Ordering {
        let ordering = match self.key {
            BeerSortKey::BeerName => a.beer_name.cmp(&b.beer_name),
            BeerSortKey::BeerStyle => a.beer_style.cmp(&b.beer_style),
            BeerSortKey::Upc => a.upc.cmp(&b.upc),
            BeerSortKey::QuantityOnHand => a.quantity_on_hand.cmp(&b.quantity_on_hand),
            BeerSortKey::Price => a.price.cmp(&b.price),
            BeerSortKey::CreatedDate => a.created_date.cmp(&b.created_date),
            BeerSortKey::LastModifiedDate => a.last_modified_date.cmp(&b.last_modified_date),
        };

        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for BeerSort {
    /// Canonical `property,direction` form, e.g. `beerName,asc`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.key.property(), self.direction.as_str())
    }
}

impl FromStr for BeerSort {
    type Err = SortParseError;

    /// Parse `property` or `property,direction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (property, direction) = match s.split_once(',') {
            Some((property, direction)) => (property, direction.parse()?),
            None => (s, Direction::Asc),
        };
        Ok(Self::new(property.parse()?, direction))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_only() {
        let sort: BeerSort = "beerName".parse().unwrap();
        assert_eq!(sort, BeerSort::new(BeerSortKey::BeerName, Direction::Asc));
    }

    #[test]
    fn test_parse_with_direction() {
        let sort: BeerSort = "quantityOnHand,DESC".parse().unwrap();
        assert_eq!(sort.key, BeerSortKey::QuantityOnHand);
        assert_eq!(sort.direction, Direction::Desc);
    }

    #[test]
    fn test_parse_unknown_property() {
        assert_eq!(
            "colour,asc".parse::<BeerSort>(),
            Err(SortParseError::UnknownProperty("colour".to_string()))
        );
    }

    #[test]
    fn test_parse_unknown_direction() {
        assert!(matches!(
            "price,sideways".parse::<BeerSort>(),
            Err(SortParseError::UnknownDirection(_))
        ));
    }

    #[test]
    fn test_display_is_canonical() {
        let sort: BeerSort = " beerName , DESC".parse().unwrap();
        assert_eq!(sort.to_string(), "beerName,desc");

        let sort: BeerSort = "price".parse().unwrap();
        assert_eq!(sort.to_string(), "price,asc");
    }

    #[test]
    fn test_property_names_roundtrip() {
        for key in [
            BeerSortKey::BeerName,
            BeerSortKey::BeerStyle,
            BeerSortKey::Upc,
            BeerSortKey::QuantityOnHand,
            BeerSortKey::Price,
            BeerSortKey::CreatedDate,
            BeerSortKey::LastModifiedDate,
        ] {
            assert_eq!(key.property().parse::<BeerSortKey>().unwrap(), key);
        }
    }
}
