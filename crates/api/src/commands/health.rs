//! Health check endpoint for load balancers and monitoring

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// Get service health
///
/// Responds `200` when every component is healthy and `503` otherwise.
///
/// # Example Response
/// ```json
/// {
///   "isHealthy": true,
///   "score": 1.0,
///   "components": [
///     { "name": "database", "isHealthy": true, "message": "4/8 connections idle" },
///     { "name": "storage", "isHealthy": true, "message": "local backend" }
///   ],
///   "timestamp": 1698765432
/// }
/// ```
pub async fn get_health(State(ctx): State<Arc<AppContext>>) -> (StatusCode, Json<HealthStatus>) {
    let status = ctx.health_check().await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
