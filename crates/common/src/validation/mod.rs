//! Field-level validation framework
//!
//! Validators check a single value and report a human-readable message;
//! [`Validator`] collects failures per field so a form can show every
//! problem next to the offending input at once.

use std::fmt;

use serde::{Deserialize, Serialize};

mod validators;

pub use validators::{
    FieldValidator, HexColorValidator, LengthValidator, PatternValidator, RequiredValidator,
    UrlValidator,
};

/// Type alias for validation results
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A single failed check, attached to the field that caused it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation error with detailed field-level errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Create a new, empty validation error
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add_field_error(field, message);
        err
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError { field: field.into(), message: message.into() });
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors recorded for one field
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Merge another error's field errors into this one
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    /// Consume into `Ok(())` when empty, `Err(self)` otherwise
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        write!(f, "validation failed: {joined}")
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Vec<FieldError> {
    fn from(value: ValidationError) -> Self {
        value.errors
    }
}

/// Collects field errors across several checks
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationError,
}

impl Validator {
    /// Create an empty validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `validator` against `value`, recording a failure under `field`.
    ///
    /// Returns `true` when the value passed.
    pub fn validate_field<T, V>(&mut self, field: &str, value: &T, validator: &V) -> bool
    where
        T: ?Sized,
        V: FieldValidator<T>,
    {
        match validator.validate(value) {
            Ok(()) => true,
            Err(message) => {
                self.errors.add_field_error(field, message);
                false
            }
        }
    }

    /// Record a failure that does not come from a reusable validator
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add_field_error(field, message);
    }

    /// Whether any check failed so far
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of recorded failures
    pub fn error_count(&self) -> usize {
        self.errors.errors.len()
    }

    /// Finish validation
    pub fn finalize(self) -> ValidationResult<()> {
        self.errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_validator_finalizes_ok() {
        assert!(Validator::new().finalize().is_ok());
    }

    #[test]
    fn errors_are_grouped_by_field() {
        let mut validator = Validator::new();
        validator.validate_field("title", "", &RequiredValidator::new("Title is required"));
        validator.validate_field("url", "example.com", &UrlValidator::http());

        let err = validator.finalize().unwrap_err();
        assert_eq!(err.field_errors("title").len(), 1);
        assert_eq!(err.field_errors("url").len(), 1);
        assert_eq!(err.field_errors("title")[0].message, "Title is required");
    }

    #[test]
    fn display_joins_field_errors() {
        let mut err = ValidationError::field("title", "Title is required");
        err.add_field_error("url", "URL is required");
        assert_eq!(
            err.to_string(),
            "validation failed: title: Title is required; url: URL is required"
        );
    }
}
