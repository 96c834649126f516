//! Static reference data: themes, fonts and social icons

use serde::Serialize;

use crate::constants::DEFAULT_THEME;

// ============================================================================
// Themes
// ============================================================================

/// Immutable theme preset (Tailwind utility classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub background: &'static str,
    pub button_style: &'static str,
    pub text_color: &'static str,
}

const fn theme(
    id: &'static str,
    name: &'static str,
    background: &'static str,
    button_style: &'static str,
    text_color: &'static str,
) -> Theme {
    Theme { id, name, background, button_style, text_color }
}

/// Theme catalog; the first entry is the fallback
pub static THEMES: [Theme; 11] = [
    theme(
        DEFAULT_THEME,
        "Default",
        "bg-gradient-to-br from-purple-50 to-indigo-100",
        "bg-white text-gray-800",
        "text-gray-800",
    ),
    theme(
        "purple",
        "Purple",
        "bg-gradient-to-br from-purple-500 to-indigo-600",
        "bg-white text-purple-600",
        "text-white",
    ),
    theme(
        "ocean",
        "Ocean",
        "bg-gradient-to-br from-blue-400 to-cyan-500",
        "bg-white text-blue-600",
        "text-white",
    ),
    theme(
        "sunset",
        "Sunset",
        "bg-gradient-to-br from-orange-400 to-pink-500",
        "bg-white text-orange-600",
        "text-white",
    ),
    theme(
        "forest",
        "Forest",
        "bg-gradient-to-br from-green-400 to-teal-500",
        "bg-white text-green-600",
        "text-white",
    ),
    theme(
        "midnight",
        "Midnight",
        "bg-gradient-to-br from-gray-900 to-blue-900",
        "bg-blue-200 text-blue-900",
        "text-white",
    ),
    theme(
        "pastel",
        "Pastel",
        "bg-gradient-to-br from-pink-200 to-blue-200",
        "bg-white text-pink-600 border border-pink-300",
        "text-gray-800",
    ),
    theme("neon", "Neon", "bg-black", "bg-pink-500 text-white hover:bg-pink-600", "text-pink-400"),
    theme(
        "autumn",
        "Autumn",
        "bg-gradient-to-br from-yellow-500 to-red-500",
        "bg-amber-100 text-amber-900",
        "text-white",
    ),
    theme(
        "monochrome",
        "Monochrome",
        "bg-gray-100",
        "bg-gray-800 text-white hover:bg-gray-700",
        "text-gray-800",
    ),
    theme(
        "galaxy",
        "Galaxy",
        "bg-gradient-to-br from-purple-900 to-indigo-900",
        "bg-purple-200 text-purple-900 border border-purple-300",
        "text-white",
    ),
];

/// Look up a theme, falling back to the default theme for unknown ids
pub fn theme_by_id(id: &str) -> &'static Theme {
    THEMES.iter().find(|t| t.id == id).unwrap_or(&THEMES[0])
}

// ============================================================================
// Fonts
// ============================================================================

pub const FONT_FAMILIES: [&str; 6] =
    ["Inter", "Roboto", "Poppins", "Montserrat", "Open Sans", "Playfair Display"];

pub fn is_known_font(family: &str) -> bool {
    FONT_FAMILIES.contains(&family)
}

// ============================================================================
// Social icons
// ============================================================================

/// Social icon key attached to a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    Facebook,
    Twitter,
    Instagram,
    LinkedIn,
    GitHub,
    YouTube,
    Email,
    Website,
    Twitch,
    Dribbble,
    Figma,
    Slack,
    Other,
}

crate::impl_keyword_conversions!(SocialIcon {
    Facebook => "facebook",
    Twitter => "twitter",
    Instagram => "instagram",
    LinkedIn => "linkedin",
    GitHub => "github",
    YouTube => "youtube",
    Email => "email",
    Website => "website",
    Twitch => "twitch",
    Dribbble => "dribbble",
    Figma => "figma",
    Slack => "slack",
    Other => "other",
});

impl SocialIcon {
    pub const ALL: [SocialIcon; 13] = [
        Self::Facebook,
        Self::Twitter,
        Self::Instagram,
        Self::LinkedIn,
        Self::GitHub,
        Self::YouTube,
        Self::Email,
        Self::Website,
        Self::Twitch,
        Self::Dribbble,
        Self::Figma,
        Self::Slack,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter/X",
            Self::Instagram => "Instagram",
            Self::LinkedIn => "LinkedIn",
            Self::GitHub => "GitHub",
            Self::YouTube => "YouTube",
            Self::Email => "Email",
            Self::Website => "Website",
            Self::Twitch => "Twitch",
            Self::Dribbble => "Dribbble",
            Self::Figma => "Figma",
            Self::Slack => "Slack",
            Self::Other => "Other",
        }
    }

    pub fn url_prefix(self) -> &'static str {
        match self {
            Self::Facebook => "https://facebook.com/",
            Self::Twitter => "https://twitter.com/",
            Self::Instagram => "https://instagram.com/",
            Self::LinkedIn => "https://linkedin.com/in/",
            Self::GitHub => "https://github.com/",
            Self::YouTube => "https://youtube.com/",
            Self::Email => "mailto:",
            Self::Website | Self::Other => "https://",
            Self::Twitch => "https://twitch.tv/",
            Self::Dribbble => "https://dribbble.com/",
            Self::Figma => "https://figma.com/@",
            Self::Slack => "https://slack.com/",
        }
    }

    /// Build the link URL for a handle; full URLs pass through unchanged
    pub fn compose_url(self, handle: &str) -> String {
        let handle = handle.trim();
        if handle.starts_with("http://") || handle.starts_with("https://") || handle.starts_with("mailto:") {
            return handle.to_string();
        }
        format!("{}{}", self.url_prefix(), handle.trim_start_matches('@'))
    }
}
