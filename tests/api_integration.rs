//! Integration tests for the analytics endpoint
//!
//! These drive the full router with a canned GA4 client and check the
//! response document, CORS behaviour and the failure contract.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use chrono::{TimeZone, Utc};
use common::{create_test_router, FixtureClient, TEST_ORIGIN};
use ga4_dashboard::config::ReportConfig;
use ga4_dashboard::ga4::DimensionName;
use ga4_dashboard::report::ReportAggregator;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn send(client: Arc<FixtureClient>, method: Method, uri: &str) -> Response {
    create_test_router(client)
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], TEST_ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
}

#[tokio::test]
async fn test_get_analytics_returns_full_report() {
    let client = Arc::new(FixtureClient::new());
    let response = send(client.clone(), Method::GET, "/get-analytics").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_cors_headers(&response);
    assert_eq!(client.calls(), 7);

    let body = body_json(response).await;
    assert_eq!(body["totalVisits"], 1234);
    assert_eq!(body["monthlyVisits"], 56);

    let pages = body["topPages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["path"], "/");
    assert_eq!(pages[0]["title"], "Inicio");
    assert_eq!(pages[0]["visits"], 500);
    assert_eq!(pages[1]["path"], "tramites");

    assert_eq!(body["devices"]["desktop"], 300);
    assert_eq!(body["devices"]["tablet"], 10);

    let browsers: Vec<&String> = body["browsers"].as_object().unwrap().keys().collect();
    assert_eq!(browsers, vec!["Chrome", "Safari", "Edge"]);

    let daily = body["dailyVisits"].as_array().unwrap();
    assert_eq!(daily[0]["date"], "2025-10-16");
    assert_eq!(daily[2]["date"], "2025-10-18");
    assert_eq!(daily[2]["visits"], 0, "missing metric coerces to zero");

    let trend = body["monthlyTrend"].as_array().unwrap();
    assert_eq!(trend[0]["period"], "sept 2025");
    assert_eq!(trend[1]["period"], "oct 2025");
    assert_eq!(trend[1]["visits"], 40);

    let last_update = body["lastUpdate"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(last_update).is_ok());
    assert!(last_update.ends_with('Z'));
}

#[tokio::test]
async fn test_browser_order_survives_serialization() {
    let response = send(Arc::new(FixtureClient::new()), Method::GET, "/get-analytics").await;
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(r#""browsers":{"Chrome":400,"Safari":90,"Edge":20}"#));
}

#[tokio::test]
async fn test_preflight_is_no_content_with_cors() {
    let client = Arc::new(FixtureClient::new());
    let response = send(client.clone(), Method::OPTIONS, "/get-analytics").await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors_headers(&response);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
    assert_eq!(client.calls(), 0, "preflight must not query GA4");
}

#[tokio::test]
async fn test_failed_query_returns_generic_500_with_cors() {
    let client = Arc::new(FixtureClient {
        fail_on: Some(DimensionName::DeviceCategory),
        ..FixtureClient::new()
    });
    let response = send(client, Method::GET, "/get-analytics").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&response);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"error": "Failed to fetch analytics data"}));
}

#[tokio::test]
async fn test_empty_devices_is_an_empty_object() {
    let client = Arc::new(FixtureClient {
        empty_devices: true,
        ..FixtureClient::new()
    });
    let response = send(client, Method::GET, "/get-analytics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["devices"], serde_json::json!({}));
}

#[tokio::test]
async fn test_legacy_function_path_serves_the_same_report() {
    let response = send(
        Arc::new(FixtureClient::new()),
        Method::GET,
        "/.netlify/functions/get-analytics",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert_eq!(body_json(response).await["totalVisits"], 1234);
}

#[tokio::test]
async fn test_health_check() {
    let response = send(Arc::new(FixtureClient::new()), Method::GET, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "OK");
}

#[tokio::test]
async fn test_dashboard_page_is_served_at_root() {
    let response = send(Arc::new(FixtureClient::new()), Method::GET, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");

    let script = send(Arc::new(FixtureClient::new()), Method::GET, "/app.js").await;
    assert_eq!(script.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_same_upstream_data_gives_identical_json() {
    let now = Utc.with_ymd_and_hms(2025, 10, 18, 12, 0, 0).unwrap();
    let first = ReportAggregator::new(Arc::new(FixtureClient::new()), ReportConfig::default())
        .aggregate_at(now)
        .await
        .unwrap();
    let second = ReportAggregator::new(Arc::new(FixtureClient::new()), ReportConfig::default())
        .aggregate_at(now)
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let client = Arc::new(FixtureClient::new());
    let router = create_test_router(client.clone());

    let mut handles = Vec::new();
    for _ in 0..10 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            router
                .oneshot(
                    Request::builder()
                        .uri("/get-analytics")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap()
                .status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(client.calls(), 70);
}
