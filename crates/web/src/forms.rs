//! Text binding for beer create and edit payloads.
//!
//! Browsers submit every field as text, so a form is bound in two steps:
//! text is converted into a [`BeerInput`] (conversion failures become field
//! errors), then the input is validated. A field that failed conversion is
//! not validated again. JSON bodies go through the same path via
//! [`BeerPayload`], so a bad timestamp or style is a field error rather than
//! a rejected body.
//!
//! A field missing from the submission is absent and left alone on update.
//! A submitted blank name or UPC is present and fails validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use brewery_core::{
    Beer, BeerInput, BeerStyle, SERVER_MANAGED_FIELDS, ValidationErrors, ValidationMode, fields,
};

/// Raw `beerForm` submission. Missing fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerForm {
    pub beer_name: Option<String>,
    pub beer_style: Option<String>,
    pub upc: Option<String>,
    pub quantity_on_hand: Option<String>,
    pub price: Option<String>,
    pub created_date: Option<String>,
    pub last_modified_date: Option<String>,
}

impl BeerForm {
    /// Pre-populate the form from a stored beer.
    #[must_use]
    pub fn from_beer(beer: &Beer) -> Self {
        Self {
            beer_name: Some(beer.beer_name.clone()),
            beer_style: Some(beer.beer_style.code().to_string()),
            upc: Some(beer.upc.clone()),
            quantity_on_hand: Some(beer.quantity_on_hand.to_string()),
            price: Some(beer.price.to_string()),
            created_date: Some(beer.created_date.to_rfc3339()),
            last_modified_date: Some(beer.last_modified_date.to_rfc3339()),
        }
    }

    /// Submitted text for `field`, or empty when absent.
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        let value = match field {
            fields::BEER_NAME => &self.beer_name,
            fields::BEER_STYLE => &self.beer_style,
            fields::UPC => &self.upc,
            fields::QUANTITY_ON_HAND => &self.quantity_on_hand,
            fields::PRICE => &self.price,
            fields::CREATED_DATE => &self.created_date,
            fields::LAST_MODIFIED_DATE => &self.last_modified_date,
            _ => &None,
        };
        value.as_deref().unwrap_or_default()
    }

    /// Bind and validate, returning the payload with every field error.
    #[must_use]
    pub fn check(&self, mode: ValidationMode) -> (BeerInput, ValidationErrors) {
        self.check_after(ValidationErrors::new(), mode)
    }

    /// Bind and validate on top of errors already recorded for this payload.
    fn check_after(
        &self,
        mut errors: ValidationErrors,
        mode: ValidationMode,
    ) -> (BeerInput, ValidationErrors) {
        let input = self.bind(&mut errors);
        let mut rule_errors = ValidationErrors::new();
        for error in &input.validate(mode) {
            if !errors.has_field(error.field) {
                rule_errors.add(error.field, error.message.clone());
            }
        }
        errors.extend(rule_errors);
        (input, errors)
    }

    /// Convert the text fields into a typed payload.
    ///
    /// Name and UPC are kept verbatim when present. Other blank fields are
    /// absent.
    fn bind(&self, errors: &mut ValidationErrors) -> BeerInput {
        BeerInput {
            beer_name: self.beer_name.clone(),
            beer_style: parse_field(errors, fields::BEER_STYLE, self.beer_style.as_deref(), |s| {
                s.parse::<BeerStyle>().map_err(|e| e.to_string())
            }),
            upc: self.upc.clone(),
            quantity_on_hand: parse_field(
                errors,
                fields::QUANTITY_ON_HAND,
                self.quantity_on_hand.as_deref(),
                |s| s.parse::<i32>().map_err(|_| "must be a whole number".to_string()),
            ),
            price: parse_field(errors, fields::PRICE, self.price.as_deref(), |s| {
                s.parse::<Decimal>()
                    .map_err(|_| "must be a decimal amount".to_string())
            }),
            created_date: parse_field(
                errors,
                fields::CREATED_DATE,
                self.created_date.as_deref(),
                parse_instant,
            ),
            last_modified_date: parse_field(
                errors,
                fields::LAST_MODIFIED_DATE,
                self.last_modified_date.as_deref(),
                parse_instant,
            ),
        }
    }
}

/// JSON create/update body. Values are read as text and bound like a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerPayload {
    pub beer_name: Option<Value>,
    pub beer_style: Option<Value>,
    pub upc: Option<Value>,
    pub quantity_on_hand: Option<Value>,
    pub price: Option<Value>,
    pub created_date: Option<Value>,
    pub last_modified_date: Option<Value>,
}

impl BeerPayload {
    /// Bind and validate, returning the payload with every field error.
    #[must_use]
    pub fn check(self, mode: ValidationMode) -> (BeerInput, ValidationErrors) {
        let mut errors = ValidationErrors::new();
        let form = BeerForm {
            beer_name: json_text(&mut errors, fields::BEER_NAME, self.beer_name),
            beer_style: json_text(&mut errors, fields::BEER_STYLE, self.beer_style),
            upc: json_text(&mut errors, fields::UPC, self.upc),
            quantity_on_hand: json_text(&mut errors, fields::QUANTITY_ON_HAND, self.quantity_on_hand),
            price: json_text(&mut errors, fields::PRICE, self.price),
            created_date: json_text(&mut errors, fields::CREATED_DATE, self.created_date),
            last_modified_date: json_text(
                &mut errors,
                fields::LAST_MODIFIED_DATE,
                self.last_modified_date,
            ),
        };
        form.check_after(errors, mode)
    }
}

/// Log errors on server-managed fields that are about to be ignored.
pub fn log_ignored(errors: &ValidationErrors) {
    if !errors.is_empty() {
        tracing::warn!(%errors, "Ignoring validation errors on server-managed fields");
    }
}

/// Split `errors` into blocking errors and ignorable server-managed ones.
///
/// # Errors
///
/// Returns the blocking errors if any field outside
/// [`SERVER_MANAGED_FIELDS`] failed.
pub fn reject_blocking(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.has_errors_outside(&SERVER_MANAGED_FIELDS) {
        return Err(errors.without_fields(&SERVER_MANAGED_FIELDS));
    }
    log_ignored(&errors);
    Ok(())
}

fn json_text(errors: &mut ValidationErrors, field: &'static str, value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            errors.add(field, "must be a string or number");
            None
        }
    }
}

fn parse_field<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    match parse(trimmed) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| "must be an RFC 3339 timestamp".to_string())
}
