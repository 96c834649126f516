//! Slider image types

use serde::{Deserialize, Serialize};

use super::column::{Assignments, ColumnValue};
use crate::constants::DEFAULT_GRID_COLUMNS;
use crate::impl_keyword_conversions;

/// Arrangement of slider images on the public page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLayout {
    #[default]
    Row,
    Column,
    Grid,
}

impl_keyword_conversions!(ImageLayout {
    Row => "row",
    Column => "column",
    Grid => "grid",
});

/// Number of grid columns; only 2, 3 or 4 are valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct GridColumns(u8);

impl GridColumns {
    pub fn get(self) -> u8 {
        self.0
    }

    /// Lenient parse for stored values
    pub fn from_stored(value: Option<i64>) -> Self {
        value.and_then(|v| Self::try_from(v).ok()).unwrap_or_default()
    }
}

impl Default for GridColumns {
    fn default() -> Self {
        Self(DEFAULT_GRID_COLUMNS)
    }
}

impl TryFrom<i64> for GridColumns {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            2..=4 => Ok(Self(value as u8)),
            other => Err(format!("grid columns must be 2, 3 or 4, got {other}")),
        }
    }
}

impl From<GridColumns> for i64 {
    fn from(value: GridColumns) -> Self {
        i64::from(value.0)
    }
}

/// Row of the `images` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub user_id: String,
    pub url: String,
    pub alt: Option<String>,
    pub position: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Image view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub url: String,
    pub alt: String,
    pub position: i64,
}

impl From<ImageRecord> for Image {
    fn from(record: ImageRecord) -> Self {
        Self {
            id: record.id,
            url: record.url,
            alt: record.alt.unwrap_or_default(),
            position: record.position,
        }
    }
}

/// Input for adding a slider image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Partial update of a slider image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImagePatch {
    pub url: Option<String>,
    pub alt: Option<String>,
}

impl ImagePatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.alt.is_none()
    }

    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        if let Some(url) = &self.url {
            out.push(("url", ColumnValue::text(url.trim())));
        }
        if let Some(alt) = &self.alt {
            out.push(("alt", ColumnValue::text(alt.as_str())));
        }
        out
    }
}
