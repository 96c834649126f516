//! Profile, catalog and health routes over a real database.

#[allow(dead_code)]
mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::TestApp;

const ALICE: &str = "5d2c8e1a-0f3b-4c7d-9a6e-1b2c3d4e5f60";
const BOB: &str = "a0b1c2d3-e4f5-4a6b-8c9d-0e1f2a3b4c5d";

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_database_and_storage() {
    let app = TestApp::new();

    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isHealthy"], true);
    let names: Vec<&str> =
        body["components"].as_array().unwrap().iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["database", "storage"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn catalogs_are_public() {
    let app = TestApp::new();

    let (status, themes) = app.get("/api/themes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(themes.as_array().unwrap().len(), 11);
    assert_eq!(themes[0]["id"], "default");

    let (_, fonts) = app.get("/api/fonts", None).await;
    assert!(fonts.as_array().unwrap().iter().any(|f| f == "Inter"));

    let (_, icons) = app.get("/api/social-icons", None).await;
    let email = icons.as_array().unwrap().iter().find(|i| i["key"] == "email").unwrap();
    assert_eq!(email["urlPrefix"], "mailto:");
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_requires_a_session() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/profile", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["type"], "Unauthenticated");
}

#[tokio::test(flavor = "multi_thread")]
async fn first_visit_provisions_and_public_page_resolves() {
    let app = TestApp::new();

    let (status, profile) = app.get("/api/profile", Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["id"], ALICE);
    assert_eq!(profile["username"], "user_5d2c8e1a");
    assert_eq!(profile["links"], json!([]));

    let (status, public) = app.get("/u/USER_5D2C8E1A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(public, profile);

    let (status, body) = app.get("/u/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["type"], "NotFound");
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_patch_validates_and_detects_username_conflicts() {
    let app = TestApp::new();
    app.get("/api/profile", Some(ALICE)).await;
    app.get("/api/profile", Some(BOB)).await;

    let (status, profile) = app
        .json("PATCH", "/api/profile", ALICE, json!({ "username": "Creator", "bio": "hello" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "creator");
    assert_eq!(profile["bio"], "hello");

    let (status, body) =
        app.json("PATCH", "/api/profile", BOB, json!({ "username": "creator" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["type"], "Conflict");

    let (status, body) =
        app.json("PATCH", "/api/profile", BOB, json!({ "fontColor": "blue" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "Validation");
    assert_eq!(body["message"][0]["field"], "fontColor");
}

#[tokio::test(flavor = "multi_thread")]
async fn slider_settings_round_trip() {
    let app = TestApp::new();
    app.get("/api/profile", Some(ALICE)).await;

    let (status, profile) =
        app.json("PUT", "/api/profile/slider", ALICE, json!({ "enabled": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["useInfiniteSlider"], true);

    let (status, profile) = app
        .json("PUT", "/api/profile/layout", ALICE, json!({ "layout": "grid", "gridColumns": 4 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["imageLayout"], "grid");
    assert_eq!(profile["gridColumns"], 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn discover_lists_and_searches_public_profiles() {
    let app = TestApp::new();
    app.get("/api/profile", Some(ALICE)).await;
    app.get("/api/profile", Some(BOB)).await;
    app.json("PATCH", "/api/profile", ALICE, json!({ "displayName": "Alice Makes" })).await;

    let (status, all) = app.get("/api/discover", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, found) = app.get("/api/discover?q=makes&limit=5", None).await;
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["username"], "user_5d2c8e1a");
    assert_eq!(found[0]["displayName"], "Alice Makes");
    assert!(found[0].get("links").is_none());

    let (status, _) = app.get("/api/discover?limit=lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
