//! Profile commands: the signed-in dashboard view and the public page

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use linkpage_domain::{GridColumns, ImageLayout, LinkpageError, Profile, ProfileCard, ProfilePatch};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::AuthSession;
use crate::utils::command_helpers::execute_command;

/// Full profile of the signed-in user, provisioned on first visit
pub async fn get_profile(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
) -> Result<Json<Profile>, ApiError> {
    execute_command("profile::get_or_create_profile", || ctx.gateway.get_or_create_profile(&session))
        .await
        .map(Json)
}

/// Partial profile update; returns the refreshed profile
pub async fn update_profile(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<Profile>, ApiError> {
    execute_command("profile::update_profile", || ctx.gateway.update_profile(&session, patch))
        .await
        .map(Json)
}

/// Public page lookup; usernames match case-insensitively
pub async fn get_public_profile(
    State(ctx): State<Arc<AppContext>>,
    Path(username): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    execute_command("profile::get_profile_by_username", || async {
        ctx.gateway
            .get_profile_by_username(&username)
            .await?
            .ok_or_else(|| LinkpageError::NotFound(format!("profile '{username}'")))
    })
    .await
    .map(Json)
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscoverQuery {
    pub q: Option<String>,
    pub limit: Option<usize>,
}

/// Public profile directory, newest first, optionally filtered by `q`
pub async fn discover_profiles(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<DiscoverQuery>,
) -> Result<Json<Vec<ProfileCard>>, ApiError> {
    execute_command("profile::discover_profiles", || {
        ctx.gateway.discover_profiles(query.q.as_deref(), query.limit)
    })
    .await
    .map(Json)
}

#[derive(Debug, Deserialize)]
pub struct SliderRequest {
    pub enabled: bool,
}

pub async fn set_infinite_slider(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Json(request): Json<SliderRequest>,
) -> Result<Json<Profile>, ApiError> {
    execute_command("profile::set_infinite_slider", || {
        ctx.gateway.set_infinite_slider(&session, request.enabled)
    })
    .await
    .map(Json)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub layout: ImageLayout,
    #[serde(default)]
    pub grid_columns: Option<GridColumns>,
}

/// Switch the slider layout; grid layouts keep a column count
pub async fn set_image_layout(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<Profile>, ApiError> {
    execute_command("profile::set_image_layout", || {
        ctx.gateway.set_image_layout(&session, request.layout, request.grid_columns)
    })
    .await
    .map(Json)
}
