//! Typed link style values
//!
//! Style columns are plain strings in storage. They are parsed once at the
//! storage boundary into these enums and rendered back with `to_css()`, so
//! nothing downstream does ad hoc string matching on preset names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DEFAULT_BORDER_RADIUS;

// ============================================================================
// Border radius
// ============================================================================

/// Corner rounding of a link button
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BorderRadius {
    None,
    Small,
    #[default]
    Medium,
    Large,
    Full,
    /// Any other CSS length, stored verbatim
    Custom(String),
}

impl BorderRadius {
    /// Editor presets in display order
    pub const PRESETS: [BorderRadius; 5] =
        [Self::None, Self::Small, Self::Medium, Self::Large, Self::Full];

    /// CSS value for `border-radius`
    pub fn to_css(&self) -> &str {
        match self {
            Self::None => "0",
            Self::Small => "0.25rem",
            Self::Medium => DEFAULT_BORDER_RADIUS,
            Self::Large => "1rem",
            Self::Full => "9999px",
            Self::Custom(value) => value,
        }
    }

    /// Lenient parse for stored values; missing or blank yields the default
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for BorderRadius {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let parsed = match value {
            "" => return Err("border radius must not be empty".to_string()),
            "0" | "0px" | "none" => Self::None,
            "0.25rem" | "small" => Self::Small,
            "0.5rem" | "medium" => Self::Medium,
            "1rem" | "large" => Self::Large,
            "9999px" | "full" => Self::Full,
            other => Self::Custom(other.to_string()),
        };
        Ok(parsed)
    }
}

impl fmt::Display for BorderRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_css())
    }
}

impl Serialize for BorderRadius {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_css())
    }
}

impl<'de> Deserialize<'de> for BorderRadius {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Shadow
// ============================================================================

/// Drop shadow of a link button
///
/// Stored as the preset keyword or, for custom shadows, as
/// `"<x>px <y>px <blur>px <spread>px"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShadow {
    None,
    Sm,
    Md,
    Lg,
    Xl,
    Custom { offset_x: i32, offset_y: i32, blur: u32, spread: i32 },
}

const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.1)";

impl LinkShadow {
    /// Geometry as `(offset_x, offset_y, blur, spread)` in pixels
    pub fn geometry(&self) -> Option<(i32, i32, u32, i32)> {
        match *self {
            Self::None => None,
            Self::Sm => Some((0, 1, 2, 0)),
            Self::Md => Some((0, 4, 6, -1)),
            Self::Lg => Some((0, 10, 15, -3)),
            Self::Xl => Some((0, 20, 25, -5)),
            Self::Custom { offset_x, offset_y, blur, spread } => {
                Some((offset_x, offset_y, blur, spread))
            }
        }
    }

    /// CSS value for `box-shadow`, tinted with `color` when given
    pub fn to_css(&self, color: Option<&str>) -> String {
        match self.geometry() {
            None => "none".to_string(),
            Some((x, y, blur, spread)) => {
                let color = color.filter(|c| !c.trim().is_empty()).unwrap_or(DEFAULT_SHADOW_COLOR);
                format!("{x}px {y}px {blur}px {spread}px {color}")
            }
        }
    }

    /// Storage representation
    pub fn as_stored(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Sm => "sm".to_string(),
            Self::Md => "md".to_string(),
            Self::Lg => "lg".to_string(),
            Self::Xl => "xl".to_string(),
            Self::Custom { offset_x, offset_y, blur, spread } => {
                format!("{offset_x}px {offset_y}px {blur}px {spread}px")
            }
        }
    }

    /// Lenient parse for stored values; blank or unreadable yields `None`
    pub fn from_stored(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }
}

fn parse_px(token: &str) -> Option<i32> {
    token.strip_suffix("px").unwrap_or(token).parse().ok()
}

impl FromStr for LinkShadow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "none" => return Ok(Self::None),
            "sm" => return Ok(Self::Sm),
            "md" => return Ok(Self::Md),
            "lg" => return Ok(Self::Lg),
            "xl" => return Ok(Self::Xl),
            _ => {}
        }

        let parts: Vec<i32> = value.split_whitespace().filter_map(parse_px).collect();
        match parts.as_slice() {
            [offset_x, offset_y, blur, spread] if *blur >= 0 => Ok(Self::Custom {
                offset_x: *offset_x,
                offset_y: *offset_y,
                blur: blur.unsigned_abs(),
                spread: *spread,
            }),
            _ => Err(format!("Invalid shadow: {s}")),
        }
    }
}

impl Serialize for LinkShadow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_stored())
    }
}

impl<'de> Deserialize<'de> for LinkShadow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
