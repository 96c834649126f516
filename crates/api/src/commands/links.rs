//! Link commands
//!
//! Mutations are scoped to the session owner; touching someone else's link
//! yields `403` and leaves the row alone.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use linkpage_domain::{Link, LinkPatch, NewLink};

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::AuthSession;
use crate::utils::command_helpers::execute_command;

pub async fn list_links(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
) -> Result<Json<Vec<Link>>, ApiError> {
    execute_command("links::list_links", || ctx.gateway.list_links(&session)).await.map(Json)
}

/// Append a link at the end of the list
pub async fn add_link(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Json(link): Json<NewLink>,
) -> Result<(StatusCode, Json<Link>), ApiError> {
    let created = execute_command("links::add_link", || ctx.gateway.add_link(&session, link)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_link(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Path(link_id): Path<String>,
    Json(patch): Json<LinkPatch>,
) -> Result<Json<Link>, ApiError> {
    execute_command("links::update_link", || ctx.gateway.update_link(&session, &link_id, patch))
        .await
        .map(Json)
}

/// Delete a link; later positions shift down to stay dense
pub async fn delete_link(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Path(link_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    execute_command("links::delete_link", || ctx.gateway.delete_link(&session, &link_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Persist a new order; the body is every link id, first to last
pub async fn reorder_links(
    State(ctx): State<Arc<AppContext>>,
    AuthSession(session): AuthSession,
    Json(ordered): Json<Vec<String>>,
) -> Result<Json<Vec<Link>>, ApiError> {
    execute_command("links::reorder_links", || ctx.gateway.reorder_links(&session, &ordered))
        .await
        .map(Json)
}
