// ABOUTME: OAuth2 authorization-code client for the HubSpot app
// ABOUTME: Authorization URL building, state nonce generation, and code exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::utils::http_client::shared_client;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Random bytes in a state nonce (43 characters once encoded)
const STATE_NONCE_BYTES: usize = 32;

/// OAuth 2.0 client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// OAuth client ID from provider
    pub client_id: String,
    /// OAuth client secret from provider
    pub client_secret: String,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Redirect URI for OAuth callbacks
    pub redirect_uri: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for OAuth2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Outcome of an authorization-code exchange
///
/// Non-200 answers are returned rather than raised so the caller decides how
/// to report them.
#[derive(Debug, Clone)]
pub struct TokenExchangeResponse {
    /// HTTP status of the token endpoint
    pub status: u16,
    /// Token payload as a JSON object on success, the raw error body otherwise
    pub payload: Value,
}

impl TokenExchangeResponse {
    /// Whether the provider issued tokens
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Generate a URL-safe random nonce for the authorization state
#[must_use]
pub fn generate_state_nonce() -> String {
    let mut bytes = [0u8; STATE_NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// OAuth 2.0 client for the authorization-code grant
#[derive(Clone)]
pub struct OAuth2Client {
    config: OAuth2Config,
    client: reqwest::Client,
}

impl OAuth2Client {
    /// Create a client using the shared connection pool
    #[must_use]
    pub fn new(config: OAuth2Config) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Create a client with an explicit HTTP client
    #[must_use]
    pub const fn with_http_client(config: OAuth2Config, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Get the `OAuth2` configuration
    #[must_use]
    pub const fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Get authorization URL carrying the serialized state
    ///
    /// All query values are percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization URL is malformed
    pub fn get_authorization_url(&self, state: &str) -> AppResult<String> {
        let mut url = Url::parse(&self.config.auth_url).map_err(|e| {
            AppError::config(format!("Invalid auth URL '{}'", self.config.auth_url)).with_source(e)
        })?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", state)
            .append_pair("response_type", "code");

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the token endpoint cannot be reached, or answers
    /// 200 with a body that is not a JSON object (or a JSON string holding one)
    pub async fn exchange_code(&self, code: &str) -> AppResult<TokenExchangeResponse> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    "HubSpot token endpoint unreachable",
                )
                .with_source(e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            AppError::external_service("HubSpot", "Failed to read token response").with_source(e)
        })?;

        let payload = if status == 200 {
            normalize_token_payload(&body)?
        } else {
            serde_json::from_str(&body).unwrap_or(Value::String(body))
        };

        Ok(TokenExchangeResponse { status, payload })
    }
}

/// Decode a token body that is either a JSON object or a JSON string holding one
///
/// # Errors
///
/// Returns a serialization error if the body does not decode to an object
pub fn normalize_token_payload(body: &str) -> AppResult<Value> {
    let value: Value = serde_json::from_str(body)?;
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };

    if value.is_object() {
        Ok(value)
    } else {
        Err(AppError::serialization("Token response is not a JSON object"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OAuth2Config {
        OAuth2Config {
            client_id: "client-123".to_owned(),
            client_secret: "secret".to_owned(),
            auth_url: "https://app.hubspot.com/oauth/authorize".to_owned(),
            token_url: "https://api.hubapi.com/oauth/v1/token".to_owned(),
            redirect_uri: "http://localhost:8000/integrations/hubspot/oauth2callback".to_owned(),
            scopes: vec!["crm.objects.contacts.read".to_owned(), "content".to_owned()],
        }
    }

    #[test]
    fn test_authorization_url_encodes_state() {
        let client = OAuth2Client::with_http_client(test_config(), reqwest::Client::new());
        let state = r#"{"state":"abc","user_id":"u 1","org_id":"o&1"}"#;

        let url = client.get_authorization_url(state).unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: std::collections::HashMap<_, _> = parsed.query_pairs().into_owned().collect();

        assert!(url.starts_with("https://app.hubspot.com/oauth/authorize?"));
        assert_eq!(pairs["state"], state);
        assert_eq!(pairs["client_id"], "client-123");
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["scope"], "crm.objects.contacts.read content");
        assert!(!url.contains('{'));
    }

    #[test]
    fn test_shared_client_constructor_keeps_config() {
        let client = OAuth2Client::new(test_config());
        assert_eq!(client.config().client_id, "client-123");
        assert!(!format!("{:?}", client.config()).contains("secret\""));
    }

    #[test]
    fn test_invalid_auth_url_is_config_error() {
        let mut config = test_config();
        config.auth_url = "not a url".to_owned();
        let client = OAuth2Client::with_http_client(config, reqwest::Client::new());

        let error = client.get_authorization_url("state").unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_state_nonce_is_url_safe_and_unique() {
        let first = generate_state_nonce();
        let second = generate_state_nonce();

        assert_eq!(first.len(), 43);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(first, second);
    }

    #[test]
    fn test_normalize_object_payload() {
        let payload = normalize_token_payload(r#"{"access_token":"tok"}"#).unwrap();
        assert_eq!(payload["access_token"], "tok");
    }

    #[test]
    fn test_normalize_string_encoded_payload() {
        let payload =
            normalize_token_payload(r#""{\"access_token\":\"tok\",\"expires_in\":1800}""#)
                .unwrap();
        assert_eq!(payload["access_token"], "tok");
        assert_eq!(payload["expires_in"], 1800);
    }

    #[test]
    fn test_normalize_rejects_non_object() {
        assert!(normalize_token_payload("[1,2,3]").is_err());
        assert!(normalize_token_payload("not json").is_err());
    }
}
