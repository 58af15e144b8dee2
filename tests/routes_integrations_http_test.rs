// ABOUTME: HTTP-level tests for the integration and health routes
// ABOUTME: Drives the axum router end to end with a mocked HubSpot backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

mod common;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{hubspot_config, init_test_logging, state_from_url, test_cache_config};
use integration_bridge::cache::memory::InMemoryCache;
use integration_bridge::cache::{Cache, CacheProvider};
use integration_bridge::config::ServerConfig;
use integration_bridge::resources::ServerResources;
use integration_bridge::routes;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn test_app(mock_uri: &str) -> Result<Router> {
    init_test_logging();
    let cache = Cache::Memory(InMemoryCache::new(test_cache_config()).await?);
    let resources = ServerResources::with_http_client(
        ServerConfig::new(hubspot_config(mock_uri)),
        cache,
        reqwest::Client::new(),
    );
    Ok(routes::router(Arc::new(resources)))
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Vec<u8>)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

async fn send_json(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let (status, body) = send(app, request).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-123",
            "refresh_token": "refresh-456",
            "expires_in": 1800,
            "token_type": "bearer"
        })))
        .mount(server)
        .await;
}

fn callback_uri(state: &str) -> String {
    format!(
        "/integrations/hubspot/oauth2callback?code=auth-code&state={}",
        urlencoding::encode(state)
    )
}

#[tokio::test]
async fn test_authorize_returns_url_as_json_string() -> Result<()> {
    let server = MockServer::start().await;
    let app = test_app(&server.uri()).await?;

    let (status, body) = send_json(
        &app,
        form_request("/integrations/hubspot/authorize", "user_id=u1&org_id=o1"),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    let url = body.as_str().unwrap();
    assert!(url.starts_with("https://app.hubspot.com/oauth/authorize?"));
    let state: Value = serde_json::from_str(&state_from_url(url))?;
    assert_eq!(state["user_id"], "u1");
    assert_eq!(state["org_id"], "o1");
    Ok(())
}

#[tokio::test]
async fn test_authorize_rejects_blank_user() -> Result<()> {
    let server = MockServer::start().await;
    let app = test_app(&server.uri()).await?;

    let (status, body) = send_json(
        &app,
        form_request("/integrations/hubspot/authorize", "user_id=&org_id=o1"),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    assert!(body["detail"].as_str().unwrap().contains("user_id"));
    Ok(())
}

#[tokio::test]
async fn test_callback_with_provider_error_is_bad_request() -> Result<()> {
    let server = MockServer::start().await;
    let app = test_app(&server.uri()).await?;

    let (status, body) = send_json(
        &app,
        get_request("/integrations/hubspot/oauth2callback?error=access_denied"),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "access_denied");
    assert_eq!(body["error"]["code"], "OAUTH_DENIED");
    Ok(())
}

#[tokio::test]
async fn test_full_connect_flow_over_http() -> Result<()> {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "501",
                "properties": {"firstname": "Ada", "lastname": "Lovelace"},
                "createdAt": "2024-01-15T09:00:00.000Z",
                "updatedAt": "2024-02-01T12:00:00.000Z"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server.uri()).await?;

    let (_, url) = send_json(
        &app,
        form_request("/integrations/hubspot/authorize", "user_id=u1&org_id=o1"),
    )
    .await?;
    let state = state_from_url(url.as_str().unwrap());

    let (status, page) = send(&app, get_request(&callback_uri(&state))).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(page)?.contains("window.close()"));

    let (status, credentials) = send_json(
        &app,
        form_request("/integrations/hubspot/credentials", "user_id=u1&org_id=o1"),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(credentials["access_token"], "access-123");

    let (status, again) = send_json(
        &app,
        form_request("/integrations/hubspot/credentials", "user_id=u1&org_id=o1"),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(again["detail"], "No credentials found.");

    let encoded = urlencoding::encode(&credentials.to_string()).into_owned();
    let (status, items) = send_json(
        &app,
        form_request("/integrations/hubspot/load", &format!("credentials={encoded}")),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items[0]["id"], "501");
    assert_eq!(items[0]["type"], "contact");
    assert_eq!(items[0]["name"], "Ada Lovelace");
    assert_eq!(items[0]["url"], "https://app.hubspot.com/contacts/501");
    Ok(())
}

#[tokio::test]
async fn test_replayed_callback_is_rejected() -> Result<()> {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;
    let app = test_app(&server.uri()).await?;

    let (_, url) = send_json(
        &app,
        form_request("/integrations/hubspot/authorize", "user_id=u1&org_id=o1"),
    )
    .await?;
    let uri = callback_uri(&state_from_url(url.as_str().unwrap()));

    let (first, _) = send(&app, get_request(&uri)).await?;
    let (second, body) = send_json(&app, get_request(&uri)).await?;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "State does not match.");
    Ok(())
}

#[tokio::test]
async fn test_load_with_blank_credentials_is_bad_request() -> Result<()> {
    let server = MockServer::start().await;
    let app = test_app(&server.uri()).await?;

    let (status, body) =
        send_json(&app, form_request("/integrations/hubspot/load", "credentials=")).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
    Ok(())
}

#[tokio::test]
async fn test_load_passes_upstream_status_through() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/contacts"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;
    let app = test_app(&server.uri()).await?;

    let encoded = urlencoding::encode(r#"{"access_token":"access-123"}"#).into_owned();
    let (status, body) = send_json(
        &app,
        form_request("/integrations/hubspot/load", &format!("credentials={encoded}")),
    )
    .await?;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
    Ok(())
}

#[tokio::test]
async fn test_load_with_upstream_no_content_is_not_success() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/crm/v3/objects/contacts"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = test_app(&server.uri()).await?;

    let encoded = urlencoding::encode(r#"{"access_token":"access-123"}"#).into_owned();
    let (status, body) = send_json(
        &app,
        form_request("/integrations/hubspot/load", &format!("credentials={encoded}")),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
    assert!(body["detail"].as_str().unwrap().contains("204"));
    Ok(())
}

#[tokio::test]
async fn test_authorize_keeps_ids_verbatim() -> Result<()> {
    let server = MockServer::start().await;
    let app = test_app(&server.uri()).await?;

    let (status, url) = send_json(
        &app,
        form_request("/integrations/hubspot/authorize", "user_id=%20u1&org_id=o1%20"),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    let state: Value = serde_json::from_str(&state_from_url(url.as_str().unwrap()))?;
    assert_eq!(state["user_id"], " u1");
    assert_eq!(state["org_id"], "o1 ");

    let (status, _) = send_json(
        &app,
        form_request("/integrations/hubspot/authorize", "user_id=%20%20&org_id=o1"),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_health_and_ready() -> Result<()> {
    let server = MockServer::start().await;
    let app = test_app(&server.uri()).await?;

    let (status, health) = send_json(&app, get_request("/health")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, ready) = send_json(&app, get_request("/ready")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["cache"], "memory");
    Ok(())
}
