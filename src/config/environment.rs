// ABOUTME: Environment-based server configuration with .env support
// ABOUTME: Loads HubSpot app credentials, endpoint URLs, HTTP client and CORS settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::cache::CacheConfig;
use crate::constants::{hubspot, http_client, server};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::oauth2_client::OAuth2Config;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Main server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port the API listens on
    pub http_port: u16,
    /// HubSpot app registration and endpoints
    pub hubspot: HubSpotConfig,
    /// Cache backend configuration
    pub cache: CacheConfig,
    /// Outbound HTTP client configuration
    pub http_client: HttpClientConfig,
    /// Browser-facing security settings
    pub security: SecurityConfig,
}

/// HubSpot app registration and endpoint configuration
///
/// Holds the client secret, so it is never serialized and its `Debug` redacts it.
#[derive(Clone)]
pub struct HubSpotConfig {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI registered with the HubSpot app
    pub redirect_uri: String,
    /// Space-separated OAuth scopes
    pub scopes: String,
    /// Authorization endpoint
    pub auth_url: String,
    /// Token endpoint
    pub token_url: String,
    /// REST API base URL
    pub api_base_url: String,
    /// Web application base URL, used to build record links
    pub app_base_url: String,
}

// Hand-written so the secret never reaches logs
impl fmt::Debug for HubSpotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubSpotConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("app_base_url", &self.app_base_url)
            .finish()
    }
}

impl HubSpotConfig {
    /// Configuration with production endpoints for the given app credentials
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: default_redirect_uri(server::DEFAULT_HTTP_PORT),
            scopes: hubspot::DEFAULT_SCOPES.to_owned(),
            auth_url: hubspot::AUTHORIZATION_URL.to_owned(),
            token_url: hubspot::TOKEN_URL.to_owned(),
            api_base_url: hubspot::API_BASE_URL.to_owned(),
            app_base_url: hubspot::APP_BASE_URL.to_owned(),
        }
    }

    /// Load HubSpot configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `HUBSPOT_CLIENT_ID` or `HUBSPOT_CLIENT_SECRET` is missing
    pub fn from_env(http_port: u16) -> AppResult<Self> {
        Ok(Self {
            client_id: required_env("HUBSPOT_CLIENT_ID")?,
            client_secret: required_env("HUBSPOT_CLIENT_SECRET")?,
            redirect_uri: env::var("HUBSPOT_REDIRECT_URI")
                .unwrap_or_else(|_| default_redirect_uri(http_port)),
            scopes: env_var_or("HUBSPOT_SCOPES", hubspot::DEFAULT_SCOPES),
            auth_url: env_var_or("HUBSPOT_AUTH_URL", hubspot::AUTHORIZATION_URL),
            token_url: env_var_or("HUBSPOT_TOKEN_URL", hubspot::TOKEN_URL),
            api_base_url: trim_base(env_var_or("HUBSPOT_API_BASE_URL", hubspot::API_BASE_URL)),
            app_base_url: trim_base(env_var_or("HUBSPOT_APP_BASE_URL", hubspot::APP_BASE_URL)),
        })
    }

    /// OAuth client configuration for this app
    #[must_use]
    pub fn oauth2_config(&self) -> OAuth2Config {
        OAuth2Config {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_url: self.auth_url.clone(),
            token_url: self.token_url.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scopes: parse_scopes(&self.scopes),
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Total request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http_client::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http_client::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// Load HTTP client configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            timeout_secs: env_parse_or(
                "HTTP_CLIENT_TIMEOUT_SECS",
                http_client::DEFAULT_TIMEOUT_SECS,
            ),
            connect_timeout_secs: env_parse_or(
                "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                http_client::DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        }
    }
}

/// Browser-facing security settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// CORS allowed origins; `*` allows any
    pub cors_origins: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec!["*".to_owned()],
        }
    }
}

impl ServerConfig {
    /// Configuration with defaults for everything but the HubSpot app
    #[must_use]
    pub fn new(hubspot: HubSpotConfig) -> Self {
        Self {
            http_port: server::DEFAULT_HTTP_PORT,
            hubspot,
            cache: CacheConfig::default(),
            http_client: HttpClientConfig::default(),
            security: SecurityConfig::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present;
    /// variables already set in the process environment take precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if required HubSpot credentials are missing or
    /// `HTTP_PORT` is not a valid port
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let http_port = match env::var("HTTP_PORT") {
            Ok(value) => value.parse().map_err(|e| {
                AppError::config(format!("Invalid HTTP_PORT value '{value}'")).with_source(e)
            })?,
            Err(_) => server::DEFAULT_HTTP_PORT,
        };

        Ok(Self {
            http_port,
            hubspot: HubSpotConfig::from_env(http_port)?,
            cache: CacheConfig::from_env(),
            http_client: HttpClientConfig::from_env(),
            security: SecurityConfig {
                cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")),
            },
        })
    }

    /// Secret-free summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        let cache = if self.cache.redis_url.is_some() {
            "Redis"
        } else {
            "In-memory"
        };

        format!(
            "Integration Bridge Configuration: HTTP Port: {}, HubSpot Client: {}, \
             Redirect URI: {}, Scopes: {}, Cache: {cache}, CORS Origins: {}",
            self.http_port,
            self.hubspot.client_id,
            self.hubspot.redirect_uri,
            self.hubspot.scopes,
            self.security.cors_origins.join(","),
        )
    }
}

/// Read an environment variable, falling back to `default` when unset
pub(crate) fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset or invalid
pub(crate) fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn required_env(key: &str) -> AppResult<String> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::ConfigMissing,
                format!("{key} environment variable is required"),
            )
        })
}

fn default_redirect_uri(port: u16) -> String {
    format!("http://localhost:{port}{}", hubspot::CALLBACK_PATH)
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}

/// Split a scope string on whitespace or commas
fn parse_scopes(scopes: &str) -> Vec<String> {
    scopes
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}
