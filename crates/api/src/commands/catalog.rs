//! Static catalogs the dashboard renders pickers from

use axum::Json;
use linkpage_domain::{SocialIcon, Theme, FONT_FAMILIES, THEMES};
use serde::Serialize;

pub async fn list_themes() -> Json<&'static [Theme]> {
    Json(THEMES.as_slice())
}

pub async fn list_fonts() -> Json<&'static [&'static str]> {
    let fonts: &'static [&'static str] = &FONT_FAMILIES;
    Json(fonts)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialIconEntry {
    pub key: SocialIcon,
    pub label: &'static str,
    pub url_prefix: &'static str,
}

pub async fn list_social_icons() -> Json<Vec<SocialIconEntry>> {
    Json(
        SocialIcon::ALL
            .iter()
            .map(|&key| SocialIconEntry { key, label: key.label(), url_prefix: key.url_prefix() })
            .collect(),
    )
}
