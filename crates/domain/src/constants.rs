//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Link style fallbacks for rows stored before a column existed
pub const DEFAULT_BACKGROUND_COLOR: &str = "#f3f4f6";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_BORDER_RADIUS: &str = "0.5rem";

// Profile fallbacks
pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_FONT_FAMILY: &str = "Inter";
pub const DEFAULT_GRID_COLUMNS: u8 = 2;

// Provisioning
pub const USERNAME_PREFIX: &str = "user_";
pub const DISPLAY_NAME_PREFIX: &str = "User ";
pub const PROVISIONED_ID_CHARS: usize = 8;
pub const USERNAME_MIN_LENGTH: usize = 3;
pub const USERNAME_MAX_LENGTH: usize = 30;

// Image slider
pub const MAX_SLIDER_IMAGES: usize = 10;

// Discovery
pub const DISCOVER_DEFAULT_LIMIT: usize = 30;
pub const DISCOVER_MAX_LIMIT: usize = 50;

// Uploads
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const AVATAR_MAX_DIMENSION: u32 = 512;
pub const UPLOAD_TOKEN_BYTES: usize = 8;
pub const DEFAULT_BUCKET: &str = "avatars";

// Schema
pub const SCHEMA_VERSION: i64 = 2;
