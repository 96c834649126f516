//! Link types
//!
//! `LinkRecord` mirrors the `links` table; `Link` is what the dashboard and
//! the public renderer consume, with every style default filled in.

use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use super::column::{Assignments, ColumnValue};
use super::style::{BorderRadius, LinkShadow};
use crate::constants::{DEFAULT_BACKGROUND_COLOR, DEFAULT_TEXT_COLOR};
use crate::impl_keyword_conversions;

/// How a link is rendered on the public page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    #[default]
    Button,
    Icon,
    Video,
}

impl_keyword_conversions!(DisplayType {
    Button => "button",
    Icon => "icon",
    Video => "video",
});

/// Row of the `links` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub display_type: Option<String>,
    pub icon: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub border_radius: Option<String>,
    pub shadow: Option<String>,
    pub shadow_color: Option<String>,
    pub position: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Link view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
    pub display_type: DisplayType,
    pub icon: Option<String>,
    pub background_color: String,
    pub text_color: String,
    pub border_radius: BorderRadius,
    pub shadow: Option<LinkShadow>,
    pub shadow_color: Option<String>,
    pub position: i64,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<LinkRecord> for Link {
    fn from(record: LinkRecord) -> Self {
        let display_type = record
            .display_type
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            display_type,
            border_radius: BorderRadius::from_stored(record.border_radius.as_deref()),
            shadow: LinkShadow::from_stored(record.shadow.as_deref()),
            background_color: non_blank(record.background_color)
                .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
            text_color: non_blank(record.text_color)
                .unwrap_or_else(|| DEFAULT_TEXT_COLOR.to_string()),
            icon: non_blank(record.icon),
            shadow_color: non_blank(record.shadow_color),
            id: record.id,
            title: record.title,
            url: record.url,
            position: record.position,
        }
    }
}

/// Input for creating a link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub display_type: Option<DisplayType>,
}

impl NewLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), ..Self::default() }
    }
}

/// Partial update of a link
///
/// Fields left as `None` are not written. Nullable columns use a double
/// option: `Some(None)` clears the column back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub display_type: Option<DisplayType>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Option<String>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Option<String>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<Option<BorderRadius>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Option<LinkShadow>>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<Option<String>>,
}

impl LinkPatch {
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Column writes for the provided fields only
    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        if let Some(title) = &self.title {
            out.push(("title", ColumnValue::text(title.trim())));
        }
        if let Some(url) = &self.url {
            out.push(("url", ColumnValue::text(url.trim())));
        }
        if let Some(display_type) = self.display_type {
            out.push(("display_type", ColumnValue::text(display_type.as_str())));
        }
        if let Some(icon) = &self.icon {
            out.push(("icon", ColumnValue::Text(icon.clone())));
        }
        if let Some(color) = &self.background_color {
            out.push(("background_color", ColumnValue::Text(color.clone())));
        }
        if let Some(color) = &self.text_color {
            out.push(("text_color", ColumnValue::Text(color.clone())));
        }
        if let Some(radius) = &self.border_radius {
            out.push((
                "border_radius",
                ColumnValue::Text(radius.as_ref().map(|r| r.to_css().to_string())),
            ));
        }
        if let Some(shadow) = &self.shadow {
            out.push(("shadow", ColumnValue::Text(shadow.map(|s| s.as_stored()))));
        }
        if let Some(color) = &self.shadow_color {
            out.push(("shadow_color", ColumnValue::Text(color.clone())));
        }
        out
    }
}
