//! Router-level tests for `GET /me`: the endpoint must answer 200 with the
//! full schema no matter what the external fact dependency does.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use tower::ServiceExt;
use url::Url;

use profile_api::domain::service::{ProfileService, FALLBACK_FACT};
use profile_api::infra::facts::HttpFactClient;
use profile_api::{build_router, ProfileApiConfig};

fn router_for(facts_url: &str) -> axum::Router {
    let config = ProfileApiConfig::default();
    let facts = HttpFactClient::new(Url::parse(facts_url).unwrap(), Duration::from_secs(1))
        .expect("client");
    let service = Arc::new(ProfileService::new(
        config.identity.clone().into(),
        Arc::new(facts),
    ));
    build_router(service, &config)
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn assert_full_schema(body: &serde_json::Value) {
    assert_eq!(body["status"], "success");
    assert!(body["user"]["email"].is_string());
    assert!(body["user"]["name"].is_string());
    assert!(body["user"]["stack"].is_string());
    assert!(body["timestamp"].is_string());
    assert!(body["fact"].is_string());
}

#[tokio::test]
async fn me_returns_upstream_fact() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/fact");
        then.status(200)
            .json_body(serde_json::json!({ "fact": "A group of cats is a clowder." }));
    });

    let router = router_for(&format!("{}/fact", server.base_url()));
    let (status, body) = get_json(router, "/me").await;

    mock.assert();
    assert_eq!(status, StatusCode::OK);
    assert_full_schema(&body);
    assert_eq!(body["fact"], "A group of cats is a clowder.");
    assert_eq!(body["user"]["email"], "okekeebuka225@gmail.com");
    assert_eq!(body["user"]["name"], "Ebuka Okeke");
    assert_eq!(body["user"]["stack"], "Rust/Axum");
}

#[tokio::test]
async fn me_timestamp_is_millisecond_utc_with_zulu_suffix() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/fact");
        then.status(200).json_body(serde_json::json!({ "fact": "x" }));
    });

    let router = router_for(&format!("{}/fact", server.base_url()));
    let (_, body) = get_json(router, "/me").await;

    let ts = body["timestamp"].as_str().unwrap();
    assert_eq!(ts.len(), 24, "YYYY-MM-DDTHH:MM:SS.sssZ: {ts}");
    assert!(ts.ends_with('Z'));
    assert!(!ts.contains("+00:00"));

    let parsed = chrono::DateTime::parse_from_rfc3339(ts).unwrap();
    let delta = chrono::Utc::now().signed_duration_since(parsed);
    assert!(delta.num_seconds().abs() < 5, "timestamp too far from now: {ts}");
}

#[tokio::test]
async fn me_still_200_with_fallback_on_upstream_500() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/fact");
        then.status(500);
    });

    let router = router_for(&format!("{}/fact", server.base_url()));
    let (status, body) = get_json(router, "/me").await;

    assert_eq!(status, StatusCode::OK);
    assert_full_schema(&body);
    assert_eq!(body["fact"], FALLBACK_FACT);
}

#[tokio::test]
async fn me_still_200_with_fallback_when_fact_key_missing() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/fact");
        then.status(200)
            .json_body(serde_json::json!({ "length": 12 }));
    });

    let router = router_for(&format!("{}/fact", server.base_url()));
    let (status, body) = get_json(router, "/me").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fact"], FALLBACK_FACT);
}

#[tokio::test]
async fn me_still_200_with_fallback_when_upstream_unreachable() {
    // Nothing listens here
    let router = router_for("http://127.0.0.1:9/fact");
    let (status, body) = get_json(router, "/me").await;

    assert_eq!(status, StatusCode::OK);
    assert_full_schema(&body);
    assert_eq!(body["fact"], FALLBACK_FACT);
}

#[tokio::test]
async fn me_responses_carry_permissive_cors_headers() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/fact");
        then.status(200).json_body(serde_json::json!({ "fact": "x" }));
    });

    let router = router_for(&format!("{}/fact", server.base_url()));
    let response = router
        .oneshot(
            Request::builder()
                .uri("/me")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS headers must be present"
    );
}

#[tokio::test]
async fn cors_can_be_disabled_via_config() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/fact");
        then.status(200).json_body(serde_json::json!({ "fact": "x" }));
    });

    let config = ProfileApiConfig {
        cors_enabled: false,
        ..ProfileApiConfig::default()
    };
    let facts = HttpFactClient::new(
        Url::parse(&format!("{}/fact", server.base_url())).unwrap(),
        Duration::from_secs(1),
    )
    .unwrap();
    let service = Arc::new(ProfileService::new(
        config.identity.clone().into(),
        Arc::new(facts),
    ));
    let router = build_router(service, &config);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/me")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn me_responses_carry_request_id() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/fact");
        then.status(200).json_body(serde_json::json!({ "fact": "x" }));
    });

    let router = router_for(&format!("{}/fact", server.base_url()));
    let response = router
        .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn health_reports_healthy() {
    let router = router_for("http://127.0.0.1:9/fact");
    let (status, body) = get_json(router, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn me_rejects_post() {
    let router = router_for("http://127.0.0.1:9/fact");
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
