//! HTTP-level tests for the payment and reset endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use loan_hex::{LoanService, inbound::HttpServer};
use loan_repo::InMemoryCounter;
use tower::ServiceExt;

fn test_app() -> Router {
    HttpServer::new(LoanService::new(InMemoryCounter::new())).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(get(uri)).await.unwrap();
    let status = response.status();
    let body = body_string(response).await;
    (status, serde_json::from_str(&body).unwrap())
}

async fn reset(app: &Router) {
    let response = app.clone().oneshot(get("/resetCount")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_parameters_is_bad_request() {
    let app = test_app();
    let (status, json) = get_json(&app, "/payment").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);
}

#[tokio::test]
async fn test_unparsable_parameter_is_bad_request() {
    let app = test_app();
    let (status, _) = get_json(&app, "/payment?amount=lots&rate=5&years=30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/payment?amount=1000&rate=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_years_is_bad_request() {
    let app = test_app();
    let (status, json) = get_json(&app, "/payment?amount=1000&rate=5&years=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("years"));
}

#[tokio::test]
async fn test_payment_too_large_for_cents_is_bad_request() {
    let app = test_app();
    let (status, json) = get_json(&app, "/payment?amount=3e29&rate=0&years=30").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("out of range"));

    // Rejected requests leave the counter untouched
    let (_, json) = get_json(&app, "/payment?amount=1000&rate=1&years=1").await;
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn test_no_interest() {
    let app = test_app();
    reset(&app).await;

    let response = app
        .clone()
        .oneshot(get("/payment?amount=180000&rate=0&years=30"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );

    let body = body_string(response).await;
    assert!(body.contains(r#""payment":500.00"#), "{body}");

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["amount"].as_f64(), Some(180000.0));
    assert_eq!(json["rate"].as_f64(), Some(0.0));
    assert_eq!(json["years"], 30);
    assert_eq!(json["payment"].as_f64(), Some(500.0));
    assert!(json["instance"].is_null());
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn test_regular_interest() {
    let app = test_app();
    reset(&app).await;

    let (status, json) = get_json(&app, "/payment?amount=200000&rate=6.5&years=30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rate"].as_f64(), Some(6.5));
    assert_eq!(json["payment"].as_f64(), Some(1264.14));
    assert!(json["instance"].is_null());
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn test_counter_increments_across_calls() {
    let app = test_app();
    reset(&app).await;

    let (_, first) = get_json(&app, "/payment?amount=180000&rate=0&years=30").await;
    assert_eq!(first["count"], 1);

    let (_, second) = get_json(&app, "/payment?amount=200000&rate=6.5&years=30").await;
    assert_eq!(second["count"], 2);
    assert_eq!(second["payment"].as_f64(), Some(1264.14));
}

#[tokio::test]
async fn test_reset_count_returns_plain_ok() {
    let app = test_app();
    get_json(&app, "/payment?amount=1000&rate=1&years=1").await;

    let response = app.clone().oneshot(get("/resetCount")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(body_string(response).await, "OK");

    let (_, json) = get_json(&app, "/payment?amount=1000&rate=1&years=1").await;
    assert_eq!(json["count"], 1);
}

#[tokio::test]
async fn test_instance_id_is_reported() {
    let service = LoanService::new(InMemoryCounter::new()).with_instance(Some("0".into()));
    let app = HttpServer::new(service).router();

    let (_, json) = get_json(&app, "/payment?amount=1000&rate=1&years=1").await;
    assert_eq!(json["instance"], "0");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = test_app();
    let request = Request::builder()
        .uri("/payment?amount=1000&rate=1&years=1")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}
