//! Profile types
//!
//! One profile per user (`id` = user id). The record is the flat `profiles`
//! row; the view model nests links and images in position order.

use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

use super::column::{Assignments, ColumnValue};
use super::image::{GridColumns, Image, ImageLayout, ImageRecord};
use super::link::{Link, LinkRecord};
use crate::constants::{
    DEFAULT_FONT_FAMILY, DEFAULT_THEME, DISPLAY_NAME_PREFIX, PROVISIONED_ID_CHARS,
    USERNAME_PREFIX,
};

/// Lowercase, trimmed form used for storage and lookup
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Row of the `profiles` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub background_image: Option<String>,
    pub logo: Option<String>,
    pub theme: Option<String>,
    pub font_family: Option<String>,
    pub font_color: Option<String>,
    pub show_social_icons: Option<bool>,
    pub use_infinite_slider: Option<bool>,
    pub image_layout: Option<String>,
    pub grid_columns: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ProfileRecord {
    /// Placeholder profile inserted on first authenticated access
    pub fn provisioned(user_id: &str, now: i64) -> Self {
        let short: String = user_id.chars().take(PROVISIONED_ID_CHARS).collect();
        Self {
            id: user_id.to_string(),
            username: normalize_username(&format!("{USERNAME_PREFIX}{short}")),
            display_name: Some(format!("{DISPLAY_NAME_PREFIX}{short}")),
            bio: Some(String::new()),
            avatar: None,
            background_image: None,
            logo: None,
            theme: Some(DEFAULT_THEME.to_string()),
            font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
            font_color: None,
            show_social_icons: Some(false),
            use_infinite_slider: Some(false),
            image_layout: Some(ImageLayout::default().as_str().to_string()),
            grid_columns: Some(GridColumns::default().into()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar: String,
    pub background_image: String,
    pub logo: Option<String>,
    pub theme: String,
    pub font_family: String,
    pub font_color: String,
    pub show_social_icons: bool,
    pub use_infinite_slider: bool,
    pub image_layout: ImageLayout,
    pub grid_columns: GridColumns,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| fallback.to_string())
}

impl Profile {
    /// Assemble the view model; children are sorted by position
    pub fn assemble(record: ProfileRecord, links: Vec<LinkRecord>, images: Vec<ImageRecord>) -> Self {
        let mut links: Vec<Link> = links.into_iter().map(Link::from).collect();
        links.sort_by_key(|l| l.position);
        let mut images: Vec<Image> = images.into_iter().map(Image::from).collect();
        images.sort_by_key(|i| i.position);

        let image_layout = record
            .image_layout
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self {
            display_name: or_default(record.display_name, &record.username),
            bio: record.bio.unwrap_or_default(),
            avatar: record.avatar.unwrap_or_default(),
            background_image: record.background_image.unwrap_or_default(),
            logo: record.logo.filter(|v| !v.trim().is_empty()),
            theme: or_default(record.theme, DEFAULT_THEME),
            font_family: or_default(record.font_family, DEFAULT_FONT_FAMILY),
            font_color: record.font_color.unwrap_or_default(),
            show_social_icons: record.show_social_icons.unwrap_or(false),
            use_infinite_slider: record.use_infinite_slider.unwrap_or(false),
            image_layout,
            grid_columns: GridColumns::from_stored(record.grid_columns),
            id: record.id,
            username: record.username,
            links,
            images,
        }
    }
}

/// Public card shown in profile discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCard {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub avatar: String,
}

impl From<ProfileRecord> for ProfileCard {
    fn from(record: ProfileRecord) -> Self {
        Self {
            display_name: or_default(record.display_name, &record.username),
            bio: record.bio.unwrap_or_default(),
            avatar: record.avatar.unwrap_or_default(),
            id: record.id,
            username: record.username,
        }
    }
}

/// Partial update of a profile
///
/// Only provided fields are written. `logo` is nullable and uses a double
/// option so it can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub background_image: Option<String>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub logo: Option<Option<String>>,
    pub theme: Option<String>,
    pub font_family: Option<String>,
    pub font_color: Option<String>,
    pub show_social_icons: Option<bool>,
    pub use_infinite_slider: Option<bool>,
    pub image_layout: Option<ImageLayout>,
    pub grid_columns: Option<GridColumns>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Column writes for the provided fields only
    ///
    /// Usernames are normalized here so every write path stores lowercase.
    pub fn assignments(&self) -> Assignments {
        let mut out = Assignments::new();
        let text = |out: &mut Assignments, column, value: &Option<String>| {
            if let Some(v) = value {
                out.push((column, ColumnValue::text(v.as_str())));
            }
        };

        if let Some(username) = &self.username {
            out.push(("username", ColumnValue::text(normalize_username(username))));
        }
        text(&mut out, "display_name", &self.display_name);
        text(&mut out, "bio", &self.bio);
        text(&mut out, "avatar", &self.avatar);
        text(&mut out, "background_image", &self.background_image);
        if let Some(logo) = &self.logo {
            out.push(("logo", ColumnValue::Text(logo.clone())));
        }
        text(&mut out, "theme", &self.theme);
        text(&mut out, "font_family", &self.font_family);
        text(&mut out, "font_color", &self.font_color);
        if let Some(flag) = self.show_social_icons {
            out.push(("show_social_icons", ColumnValue::Bool(flag)));
        }
        if let Some(flag) = self.use_infinite_slider {
            out.push(("use_infinite_slider", ColumnValue::Bool(flag)));
        }
        if let Some(layout) = self.image_layout {
            out.push(("image_layout", ColumnValue::text(layout.as_str())));
        }
        if let Some(columns) = self.grid_columns {
            out.push(("grid_columns", ColumnValue::Integer(Some(columns.into()))));
        }
        out
    }
}
