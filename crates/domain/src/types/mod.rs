//! Domain types and models

pub mod catalog;
pub mod column;
pub mod image;
pub mod link;
pub mod profile;
pub mod style;

pub use catalog::{is_known_font, theme_by_id, SocialIcon, Theme, FONT_FAMILIES, THEMES};
pub use column::{Assignments, ColumnValue};
pub use image::{GridColumns, Image, ImageLayout, ImagePatch, ImageRecord, NewImage};
pub use link::{DisplayType, Link, LinkPatch, LinkRecord, NewLink};
pub use profile::{normalize_username, Profile, ProfileCard, ProfilePatch, ProfileRecord};
pub use style::{BorderRadius, LinkShadow};
