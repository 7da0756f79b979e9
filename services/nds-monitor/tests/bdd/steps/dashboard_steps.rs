//! BDD step definitions for the dashboard

use axum::body::Body;
use axum::http::Request;
use cucumber::{then, when};
use tower::ServiceExt;

use nds_monitor::dashboard::build_router;

use crate::world::MonitorWorld;

async fn send(world: &mut MonitorWorld, request: Request<Body>) {
    let app = build_router(world.container().clone());
    let response = app.oneshot(request).await.unwrap();
    world.response_status = Some(response.status().as_u16());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    world.response_body = Some(String::from_utf8(body.to_vec()).unwrap());
}

#[when(expr = "the dashboard receives GET {string}")]
async fn dashboard_get(world: &mut MonitorWorld, uri: String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(world, request).await;
}

#[when(expr = "the dashboard receives POST {string}")]
async fn dashboard_post_empty(world: &mut MonitorWorld, uri: String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(world, request).await;
}

#[when(expr = "the dashboard receives POST {string} with {string}")]
async fn dashboard_post_json(world: &mut MonitorWorld, uri: String, body: String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(world, request).await;
}

#[then(expr = "the dashboard should answer {int}")]
fn dashboard_status(world: &mut MonitorWorld, status: u16) {
    assert_eq!(
        world.response_status,
        Some(status),
        "body: {:?}",
        world.response_body
    );
}

#[then(expr = "the dashboard response should contain {string}")]
fn dashboard_body_contains(world: &mut MonitorWorld, expected: String) {
    let body = world.response_body.as_ref().expect("no response body");
    assert!(
        body.contains(&expected),
        "Expected response to contain '{}', but it didn't.\nResponse body:\n{}",
        expected,
        body
    );
}
