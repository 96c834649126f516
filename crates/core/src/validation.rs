//! Input validation for links, images and profile patches
//!
//! Runs before any gateway write. Failures carry one message per offending
//! field so the editor can show them inline.

use linkpage_common::validation::{
    HexColorValidator, PatternValidator, RequiredValidator, UrlValidator, ValidationResult,
    Validator,
};
use linkpage_domain::constants::{USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH};
use linkpage_domain::{normalize_username, LinkPatch, NewImage, NewLink, ProfilePatch};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[a-z0-9_.-]{{{USERNAME_MIN_LENGTH},{USERNAME_MAX_LENGTH}}}$"))
        .expect("valid username regex")
});

fn username_validator() -> PatternValidator {
    PatternValidator::new(
        USERNAME_RE.clone(),
        format!(
            "Username must be {USERNAME_MIN_LENGTH}-{USERNAME_MAX_LENGTH} characters of a-z, 0-9, '_', '.' or '-'"
        ),
    )
}

/// Link form contents as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
}

impl LinkDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }

    pub fn validate(&self) -> ValidationResult<()> {
        let mut validator = Validator::new();
        validator.validate_field("title", self.title.as_str(), &RequiredValidator::new("Title is required"));
        validator.validate_field("url", self.url.as_str(), &UrlValidator::http());
        validator.finalize()
    }

    /// Validated, trimmed input for the gateway
    pub fn into_new_link(self) -> ValidationResult<NewLink> {
        self.validate()?;
        Ok(NewLink::new(self.title.trim(), self.url.trim()))
    }
}

fn check_optional_color(validator: &mut Validator, field: &str, value: Option<&Option<String>>) {
    if let Some(Some(color)) = value {
        validator.validate_field(field, color.as_str(), &HexColorValidator);
    }
}

/// Clearable URL fields accept an empty string or an http(s) URL
fn check_optional_url(validator: &mut Validator, field: &str, value: Option<&str>) {
    if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
        validator.validate_field(field, url, &UrlValidator::http());
    }
}

pub fn validate_new_link(link: &NewLink) -> ValidationResult<()> {
    LinkDraft::new(link.title.as_str(), link.url.as_str()).validate()
}

pub fn validate_link_patch(patch: &LinkPatch) -> ValidationResult<()> {
    let mut validator = Validator::new();
    if let Some(title) = &patch.title {
        validator.validate_field("title", title.as_str(), &RequiredValidator::new("Title is required"));
    }
    if let Some(url) = &patch.url {
        validator.validate_field("url", url.as_str(), &UrlValidator::http());
    }
    check_optional_color(&mut validator, "backgroundColor", patch.background_color.as_ref());
    check_optional_color(&mut validator, "textColor", patch.text_color.as_ref());
    check_optional_color(&mut validator, "shadowColor", patch.shadow_color.as_ref());
    validator.finalize()
}

pub fn validate_new_image(image: &NewImage) -> ValidationResult<()> {
    let mut validator = Validator::new();
    validator.validate_field("url", image.url.as_str(), &UrlValidator::http());
    validator.finalize()
}

pub fn validate_profile_patch(patch: &ProfilePatch) -> ValidationResult<()> {
    let mut validator = Validator::new();

    if let Some(username) = &patch.username {
        validator.validate_field("username", normalize_username(username).as_str(), &username_validator());
    }
    if let Some(display_name) = &patch.display_name {
        validator.validate_field(
            "displayName",
            display_name.as_str(),
            &RequiredValidator::new("Display name is required"),
        );
    }
    check_optional_url(&mut validator, "avatar", patch.avatar.as_deref());
    check_optional_url(&mut validator, "backgroundImage", patch.background_image.as_deref());
    check_optional_url(&mut validator, "logo", patch.logo.as_ref().and_then(Option::as_deref));
    if let Some(color) = patch.font_color.as_deref().filter(|c| !c.is_empty()) {
        validator.validate_field("fontColor", color, &HexColorValidator);
    }
    validator.finalize()
}
