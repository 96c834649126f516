//! Reusable single-value validators

use once_cell::sync::Lazy;
use regex::Regex;

static HTTP_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://.+").expect("valid regex"));
static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex"));

/// A check over a single value
pub trait FieldValidator<T: ?Sized> {
    /// Return `Err(message)` when the value is rejected
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// Rejects empty or whitespace-only strings
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    message: String,
}

impl RequiredValidator {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl FieldValidator<str> for RequiredValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err(self.message.clone())
        } else {
            Ok(())
        }
    }
}

/// Bounds the character length of a string
#[derive(Debug, Clone, Copy)]
pub struct LengthValidator {
    min: usize,
    max: usize,
}

impl LengthValidator {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl FieldValidator<str> for LengthValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        if len < self.min {
            Err(format!("must be at least {} characters", self.min))
        } else if len > self.max {
            Err(format!("must be at most {} characters", self.max))
        } else {
            Ok(())
        }
    }
}

/// URL validator restricted to `http://` and `https://`
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlValidator;

impl UrlValidator {
    /// Accept only absolute http(s) URLs
    pub fn http() -> Self {
        Self
    }
}

impl FieldValidator<str> for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err("URL is required".to_string())
        } else if !HTTP_URL.is_match(trimmed) {
            Err("URL must start with http:// or https://".to_string())
        } else {
            Ok(())
        }
    }
}

/// CSS hex color (`#rgb` or `#rrggbb`)
#[derive(Debug, Clone, Copy, Default)]
pub struct HexColorValidator;

impl FieldValidator<str> for HexColorValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if HEX_COLOR.is_match(value) {
            Ok(())
        } else {
            Err(format!("'{value}' is not a hex color like #fff or #f3f4f6"))
        }
    }
}

/// Matches a caller-provided regular expression
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pattern: Regex,
    message: String,
}

impl PatternValidator {
    pub fn new(pattern: Regex, message: impl Into<String>) -> Self {
        Self { pattern, message: message.into() }
    }
}

impl FieldValidator<str> for PatternValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}
