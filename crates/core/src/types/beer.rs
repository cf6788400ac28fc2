//! The beer record and its edit payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BeerId, BeerStyle};
use crate::validation::ValidationErrors;

/// Payload field names, as they appear in JSON bodies and HTML forms.
pub mod fields {
    pub const ID: &str = "id";
    pub const BEER_NAME: &str = "beerName";
    pub const BEER_STYLE: &str = "beerStyle";
    pub const UPC: &str = "upc";
    pub const QUANTITY_ON_HAND: &str = "quantityOnHand";
    pub const PRICE: &str = "price";
    pub const CREATED_DATE: &str = "createdDate";
    pub const LAST_MODIFIED_DATE: &str = "lastModifiedDate";
}

/// Fields owned by the store. Errors binding them are reported but never
/// block a save.
pub const SERVER_MANAGED_FIELDS: [&str; 2] = [fields::CREATED_DATE, fields::LAST_MODIFIED_DATE];

/// Maximum beer name length, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Maximum UPC length, in characters.
pub const MAX_UPC_LEN: usize = 255;

/// A stored beer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beer {
    pub id: BeerId,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    pub quantity_on_hand: i32,
    pub price: Decimal,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl Beer {
    /// Overwrite the mutable fields present in `input`.
    ///
    /// The identifier and both timestamps are left alone; the store stamps
    /// `last_modified_date` when the record is saved.
    pub fn apply(&mut self, input: BeerInput) {
        if let Some(beer_name) = input.beer_name {
            self.beer_name = beer_name;
        }
        if let Some(beer_style) = input.beer_style {
            self.beer_style = beer_style;
        }
        if let Some(upc) = input.upc {
            self.upc = upc;
        }
        if let Some(quantity_on_hand) = input.quantity_on_hand {
            self.quantity_on_hand = quantity_on_hand;
        }
        if let Some(price) = input.price {
            self.price = price;
        }
    }
}

/// How strictly to validate a [`BeerInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every required field must be present.
    Create,
    /// Only the fields present are checked.
    Update,
}

/// A create or update payload. Absent fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerInput {
    pub beer_name: Option<String>,
    pub beer_style: Option<BeerStyle>,
    pub upc: Option<String>,
    pub quantity_on_hand: Option<i32>,
    pub price: Option<Decimal>,
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl BeerInput {
    /// Check the field rules, collecting every failure.
    #[must_use]
    pub fn validate(&self, mode: ValidationMode) -> ValidationErrors {
        let required = mode == ValidationMode::Create;
        let mut errors = ValidationErrors::new();

        match &self.beer_name {
            Some(name) => check_text(&mut errors, fields::BEER_NAME, name, MAX_NAME_LEN),
            None if required => errors.add(fields::BEER_NAME, "must not be blank"),
            None => {}
        }

        if required && self.beer_style.is_none() {
            errors.add(fields::BEER_STYLE, "must not be null");
        }

        match &self.upc {
            Some(upc) => check_text(&mut errors, fields::UPC, upc, MAX_UPC_LEN),
            None if required => errors.add(fields::UPC, "must not be blank"),
            None => {}
        }

        if self.quantity_on_hand.is_some_and(|q| q < 0) {
            errors.add(
                fields::QUANTITY_ON_HAND,
                "must be greater than or equal to 0",
            );
        }

        match self.price {
            Some(price) if price < Decimal::ZERO => {
                errors.add(fields::PRICE, "must be greater than or equal to 0");
            }
            None if required => errors.add(fields::PRICE, "must not be null"),
            _ => {}
        }

        errors
    }

    /// Validate in create mode and build a new beer stamped with `now`.
    ///
    /// Submitted timestamps are ignored.
    ///
    /// # Errors
    ///
    /// Returns the collected field errors if any rule fails.
    pub fn into_new_beer(self, now: DateTime<Utc>) -> Result<Beer, ValidationErrors> {
        let errors = self.validate(ValidationMode::Create);
        match (self.beer_name, self.beer_style, self.upc, self.price) {
            (Some(beer_name), Some(beer_style), Some(upc), Some(price)) if errors.is_empty() => {
                Ok(Beer {
                    id: BeerId::generate(),
                    beer_name,
                    beer_style,
                    upc,
                    quantity_on_hand: self.quantity_on_hand.unwrap_or(0),
                    price,
                    created_date: now,
                    last_modified_date: now,
                })
            }
            _ => Err(errors),
        }
    }
}

fn check_text(errors: &mut ValidationErrors, field: &'static str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, "must not be blank");
    } else if value.chars().count() > max {
        errors.add(field, format!("size must be between 1 and {max}"));
    }
}
