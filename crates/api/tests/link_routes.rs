//! Link and slider image routes: ownership, validation and ordering.

#[allow(dead_code)]
mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};
use support::TestApp;

const ALICE: &str = "5d2c8e1a-0f3b-4c7d-9a6e-1b2c3d4e5f60";
const MALLORY: &str = "c4d5e6f7-0819-4a2b-bc3d-4e5f60718293";

async fn add_link(app: &TestApp, user: &str, title: &str) -> Value {
    let (status, link) = app
        .json("POST", "/api/links", user, json!({ "title": title, "url": "https://example.com" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    link
}

fn ids(links: &Value) -> Vec<String> {
    links.as_array().unwrap().iter().map(|l| l["id"].as_str().unwrap().to_string()).collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_link_is_rejected_with_field_errors() {
    let app = TestApp::new();

    let (status, body) =
        app.json("POST", "/api/links", ALICE, json!({ "title": " ", "url": "example.com" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> =
        body["message"].as_array().unwrap().iter().map(|e| e["field"].as_str().unwrap()).collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"url"));

    let (_, links) = app.get("/api/links", Some(ALICE)).await;
    assert_eq!(links, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn links_append_update_and_reorder() {
    let app = TestApp::new();
    let a = add_link(&app, ALICE, "A").await;
    let b = add_link(&app, ALICE, "B").await;
    let c = add_link(&app, ALICE, "C").await;
    assert_eq!(c["position"], 2);

    let uri = format!("/api/links/{}", b["id"].as_str().unwrap());
    let (status, updated) =
        app.json("PATCH", &uri, ALICE, json!({ "title": "Blog", "shadow": "md" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Blog");

    let order = json!([c["id"], a["id"], b["id"]]);
    let (status, links) = app.json("PUT", "/api/links/order", ALICE, order.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json!(ids(&links)), order);
    let positions: Vec<i64> =
        links.as_array().unwrap().iter().map(|l| l["position"].as_i64().unwrap()).collect();
    assert_eq!(positions, vec![0, 1, 2]);
}

#[tokio::test(flavor = "multi_thread")]
async fn reorder_must_be_a_permutation() {
    let app = TestApp::new();
    let a = add_link(&app, ALICE, "A").await;
    add_link(&app, ALICE, "B").await;

    let (status, body) = app.json("PUT", "/api/links/order", ALICE, json!([a["id"]])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "InvalidInput");
}

#[tokio::test(flavor = "multi_thread")]
async fn foreign_links_are_forbidden() {
    let app = TestApp::new();
    let link = add_link(&app, ALICE, "Mine").await;
    let uri = format!("/api/links/{}", link["id"].as_str().unwrap());

    let (status, _) = app.json("PATCH", &uri, MALLORY, json!({ "title": "Gotcha" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(support::request("DELETE", &uri, Some(MALLORY), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(support::request("DELETE", &uri, Some(ALICE), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, links) = app.get("/api/links", Some(ALICE)).await;
    assert_eq!(links, json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn slider_images_stop_at_the_cap() {
    let app = TestApp::new();

    for i in 0..10 {
        let (status, _) = app
            .json("POST", "/api/images", ALICE, json!({ "url": format!("https://cdn.example/{i}.png") }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, capacity) = app.get("/api/images/capacity", Some(ALICE)).await;
    assert_eq!(capacity["canAdd"], false);

    let (status, _) = app
        .json("POST", "/api/images", ALICE, json!({ "url": "https://cdn.example/11.png" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, images) = app.get("/api/images", Some(ALICE)).await;
    let mut order = ids(&images);
    order.reverse();
    let (status, reordered) = app.json("PUT", "/api/images/order", ALICE, json!(order)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&reordered), order);
}
