// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Covers required HubSpot credentials, defaults, and overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

use integration_bridge::config::ServerConfig;
use integration_bridge::errors::ErrorCode;
use serial_test::serial;
use std::env;

const MANAGED_VARS: &[&str] = &[
    "HTTP_PORT",
    "HUBSPOT_CLIENT_ID",
    "HUBSPOT_CLIENT_SECRET",
    "HUBSPOT_REDIRECT_URI",
    "HUBSPOT_SCOPES",
    "HUBSPOT_API_BASE_URL",
    "HUBSPOT_APP_BASE_URL",
    "REDIS_URL",
    "CORS_ORIGINS",
];

fn reset_env() {
    for key in MANAGED_VARS {
        env::remove_var(key);
    }
}

fn set_credentials() {
    env::set_var("HUBSPOT_CLIENT_ID", "env-client");
    env::set_var("HUBSPOT_CLIENT_SECRET", "env-secret");
}

#[test]
#[serial]
fn test_missing_client_id_is_config_missing() {
    reset_env();
    env::set_var("HUBSPOT_CLIENT_SECRET", "env-secret");

    let error = ServerConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains("HUBSPOT_CLIENT_ID"));
    reset_env();
}

#[test]
#[serial]
fn test_defaults_when_only_credentials_set() {
    reset_env();
    set_credentials();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8000);
    assert_eq!(config.hubspot.client_id, "env-client");
    assert_eq!(
        config.hubspot.redirect_uri,
        "http://localhost:8000/integrations/hubspot/oauth2callback"
    );
    assert_eq!(config.hubspot.api_base_url, "https://api.hubapi.com");
    assert!(config.cache.redis_url.is_none());
    assert_eq!(config.security.cors_origins, vec!["*"]);
    assert!(!config.summary().contains("env-secret"));
    reset_env();
}

#[test]
#[serial]
fn test_redirect_default_follows_http_port() {
    reset_env();
    set_credentials();
    env::set_var("HTTP_PORT", "9100");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 9100);
    assert_eq!(
        config.hubspot.redirect_uri,
        "http://localhost:9100/integrations/hubspot/oauth2callback"
    );
    reset_env();
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    reset_env();
    set_credentials();
    env::set_var("HUBSPOT_REDIRECT_URI", "https://bridge.example.com/callback");
    env::set_var("HUBSPOT_API_BASE_URL", "http://127.0.0.1:9999/");
    env::set_var("REDIS_URL", "redis://127.0.0.1:6379");
    env::set_var("CORS_ORIGINS", "https://a.example.com, https://b.example.com");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(
        config.hubspot.redirect_uri,
        "https://bridge.example.com/callback"
    );
    assert_eq!(config.hubspot.api_base_url, "http://127.0.0.1:9999");
    assert_eq!(
        config.cache.redis_url.as_deref(),
        Some("redis://127.0.0.1:6379")
    );
    assert_eq!(
        config.security.cors_origins,
        vec!["https://a.example.com", "https://b.example.com"]
    );
    reset_env();
}

#[test]
#[serial]
fn test_invalid_port_is_config_error() {
    reset_env();
    set_credentials();
    env::set_var("HTTP_PORT", "not-a-port");

    let error = ServerConfig::from_env().unwrap_err();

    assert_eq!(error.code, ErrorCode::ConfigError);
    reset_env();
}
