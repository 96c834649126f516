//! Slider image commands

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use linkpage_domain::{Image, ImagePatch, NewImage};
use serde::Serialize;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::AuthSession;
use crate::utils::command_helpers::execute_command;

pub async fn list_images(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
) -> Result<Json<Vec<Image>>, ApiError> {
    execute_command("images::list_images", || ctx.gateway.list_images(&session)).await.map(Json)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCapacity {
    pub can_add: bool,
}

/// Whether another slider image fits under the per-profile cap
pub async fn image_capacity(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
) -> Result<Json<ImageCapacity>, ApiError> {
    let can_add =
        execute_command("images::can_add_image", || ctx.gateway.can_add_image(&session)).await?;
    Ok(Json(ImageCapacity { can_add }))
}

pub async fn add_image(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Json(image): Json<NewImage>,
) -> Result<(StatusCode, Json<Image>), ApiError> {
    let created =
        execute_command("images::add_image", || ctx.gateway.add_image(&session, image)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_image(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Path(image_id): Path<String>,
    Json(patch): Json<ImagePatch>,
) -> Result<Json<Image>, ApiError> {
    execute_command("images::update_image", || ctx.gateway.update_image(&session, &image_id, patch))
        .await
        .map(Json)
}

pub async fn delete_image(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Path(image_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    execute_command("images::delete_image", || ctx.gateway.delete_image(&session, &image_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_images(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Json(ordered): Json<Vec<String>>,
) -> Result<Json<Vec<Image>>, ApiError> {
    execute_command("images::reorder_images", || ctx.gateway.reorder_images(&session, &ordered))
        .await
        .map(Json)
}
