//! Router assembly

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{get, patch, post, put};
use axum::Router;
use linkpage_domain::StorageBackend;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands;
use crate::context::AppContext;

/// Build the HTTP router over a shared context
///
/// Locally stored uploads are served under `/files` so the public URLs the
/// local blob storage hands out resolve against this server.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    // The pipeline enforces the exact limit; larger bodies are cut off here
    let upload_limit = ctx.config.storage.max_upload_bytes.saturating_add(1);

    let api = Router::new()
        .route("/themes", get(commands::list_themes))
        .route("/fonts", get(commands::list_fonts))
        .route("/social-icons", get(commands::list_social_icons))
        .route("/discover", get(commands::discover_profiles))
        .route("/profile", get(commands::get_profile).patch(commands::update_profile))
        .route("/profile/slider", put(commands::set_infinite_slider))
        .route("/profile/layout", put(commands::set_image_layout))
        .route("/links", get(commands::list_links).post(commands::add_link))
        .route("/links/order", put(commands::reorder_links))
        .route("/links/{id}", patch(commands::update_link).delete(commands::delete_link))
        .route("/images", get(commands::list_images).post(commands::add_image))
        .route("/images/capacity", get(commands::image_capacity))
        .route("/images/order", put(commands::reorder_images))
        .route("/images/{id}", patch(commands::update_image).delete(commands::delete_image))
        .route(
            "/uploads/{kind}",
            post(commands::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        );

    let mut router = Router::new()
        .route("/health", get(commands::get_health))
        .route("/u/{username}", get(commands::get_public_profile))
        .nest("/api", api);

    if ctx.config.storage.backend == StorageBackend::Local {
        router = router.nest_service("/files", ServeDir::new(&ctx.config.storage.local_root));
    }

    router.layer(TraceLayer::new_for_http()).layer(cors).with_state(ctx)
}
