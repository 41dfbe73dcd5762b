mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{test_router, TestApp};
use http_body_util::BodyExt;
use tower::util::ServiceExt;

async fn get(uri: &str) -> axum::response::Response {
    test_router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "stroke-web");
}

#[tokio::test]
async fn pages_render() {
    for (uri, marker) in [
        ("/", "Start assessment"),
        ("/predict", "stroke-predict-form"),
        ("/about", "About this assessment"),
    ] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(body_text(response).await.contains(marker), "{uri}");
    }
}

#[tokio::test]
async fn predict_page_marks_active_nav_item() {
    let body = body_text(get("/predict").await).await;
    assert!(body.contains(r#"href="/predict" class="active""#));
}

#[tokio::test]
async fn serves_client_script() {
    let response = get("/static/js/predict.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("stroke-predict-form"));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = get("/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let response = get("/").await;
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn metrics_endpoint_exposes_request_counters() {
    let router = test_router();

    router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let response = router
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("http_requests_total"));
    assert!(body.contains(r#"path="/health""#));
}
