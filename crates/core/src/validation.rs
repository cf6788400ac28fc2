//! Field-level validation errors.
//!
//! Validation never stops at the first problem: every failing field is
//! collected so a form can show all of them at once.

use std::fmt;

use serde::Serialize;

/// A single failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Payload field name (camelCase, as submitted).
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// All field errors produced while binding or validating a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Create an empty error collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record an error against `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Append every error from `other`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns true if no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if `field` has at least one error.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// First message recorded for `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Returns true if any error concerns a field not listed in `ignored`.
    ///
    /// ```rust
    /// # use brewery_core::ValidationErrors;
    /// let mut errors = ValidationErrors::new();
    /// errors.add("createdDate", "must not be empty");
    /// assert!(!errors.has_errors_outside(&["createdDate", "lastModifiedDate"]));
    ///
    /// errors.add("beerName", "must not be blank");
    /// assert!(errors.has_errors_outside(&["createdDate", "lastModifiedDate"]));
    /// ```
    #[must_use]
    pub fn has_errors_outside(&self, ignored: &[&str]) -> bool {
        self.0.iter().any(|e| !ignored.contains(&e.field))
    }

    /// Keep only the errors whose field is not listed in `ignored`.
    #[must_use]
    pub fn without_fields(mut self, ignored: &[&str]) -> Self {
        self.0.retain(|e| !ignored.contains(&e.field));
        self
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
