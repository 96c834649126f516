use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use linkpage_api::{build_router, AppContext};
use linkpage_common::testing::TempDir;
use linkpage_domain::Config;
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh database and upload directory
pub struct TestApp {
    pub router: Router,
    pub ctx: Arc<AppContext>,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = TempDir::new("linkpage-api").expect("temp dir should be created");

        let mut config = Config::default();
        config.database.path = dir.join("linkpage-api.db").display().to_string();
        config.database.pool_size = 4;
        config.storage.local_root = dir.join("uploads").display().to_string();
        config.storage.public_base_url = "http://localhost/files".to_string();
        config.storage.max_upload_bytes = 256 * 1024;

        let ctx = Arc::new(AppContext::new_with_config(config).expect("context should build"));
        let router = build_router(Arc::clone(&ctx));

        Self { router, ctx, dir }
    }

    /// Send a request; returns the status and the JSON body (`Null` if empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should read");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        self.send(request("GET", uri, user, None)).await
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        user: &str,
        body: Value,
    ) -> (StatusCode, Value) {
        self.send(request(method, uri, Some(user), Some(body))).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub fn request(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("authorization", format!("Bearer {user}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    }
}
