// ABOUTME: Unified error type with standard error codes and HTTP status mapping
// ABOUTME: Shared by the OAuth flow, cache backends, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Centralized error handling for the integration bridge. Every failure the
//! bridge surfaces to a client is an [`AppError`] carrying an [`ErrorCode`],
//! a human-readable message, and (for upstream failures) the provider's own
//! HTTP status.

/// Domain errors raised by the HubSpot integration flow
pub mod integration;

pub use integration::IntegrationError;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// A required field was absent or empty
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A field was present but could not be parsed
    #[serde(rename = "INVALID_FORMAT")]
    InvalidFormat = 3002,

    // OAuth flow (4100-4199)
    /// The provider reported that the user denied or aborted authorization
    #[serde(rename = "OAUTH_DENIED")]
    OAuthDenied = 4100,
    /// The returned state does not match the one issued for this user/org
    #[serde(rename = "STATE_MISMATCH")]
    StateMismatch = 4101,
    /// The provider rejected the authorization code
    #[serde(rename = "TOKEN_EXCHANGE_FAILED")]
    TokenExchangeFailed = 4102,
    /// No stored credentials for this user/org (never issued or already consumed)
    #[serde(rename = "CREDENTIALS_NOT_FOUND")]
    CredentialsNotFound = 4103,
    /// Credentials were supplied without an access token
    #[serde(rename = "MISSING_ACCESS_TOKEN")]
    MissingAccessToken = 4104,

    // External Services (5000-5999)
    /// An external service returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// An external service could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,

    // Configuration (6000-6999)
    /// Configuration could not be loaded
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// A required configuration value is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// The cache backend failed
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data could not be serialized or deserialized
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // 400 Bad Request
            Self::MissingRequiredField
            | Self::InvalidFormat
            | Self::OAuthDenied
            | Self::StateMismatch
            | Self::TokenExchangeFailed
            | Self::CredentialsNotFound
            | Self::MissingAccessToken => 400,

            // 502 Bad Gateway
            Self::ExternalServiceError => 502,

            // 503 Service Unavailable
            Self::ExternalServiceUnavailable => 503,

            // 500 Internal Server Error
            Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::InvalidFormat => "The data format is invalid",
            Self::OAuthDenied => "Authorization was denied by the provider",
            Self::StateMismatch => "The OAuth state parameter is invalid",
            Self::TokenExchangeFailed => "The authorization code could not be exchanged",
            Self::CredentialsNotFound => "No stored credentials were found",
            Self::MissingAccessToken => "The credentials do not contain an access token",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Cache operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, thiserror::Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Status reported by an upstream provider, overriding the code's default
    pub upstream_status: Option<u16>,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            upstream_status: None,
            source: None,
        }
    }

    /// Attach the status code an upstream provider answered with
    #[must_use]
    pub fn with_upstream_status(mut self, status: u16) -> Self {
        self.upstream_status = Some(status);
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.upstream_status.unwrap_or_else(|| self.code.http_status())
    }

    /// Required field missing or empty
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Cache backend error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Structured error details
    pub error: ErrorResponseDetails,
    /// Flat message kept for clients that only read `detail`
    pub detail: String,
}

/// Structured part of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message.clone(),
            },
            detail: error.message.clone(),
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, status = %status, "{self}");
        } else {
            tracing::debug!(code = ?self.code, status = %status, "{self}");
        }

        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::StateMismatch.http_status(), 400);
        assert_eq!(ErrorCode::CredentialsNotFound.http_status(), 400);
        assert_eq!(ErrorCode::ExternalServiceError.http_status(), 502);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_upstream_status_overrides_code() {
        let error = AppError::external_service("HubSpot", "rate limited").with_upstream_status(429);
        assert_eq!(error.http_status(), 429);
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::new(ErrorCode::StateMismatch, "State does not match.");
        let json = serde_json::to_value(ErrorResponse::from(&error)).unwrap();

        assert_eq!(json["error"]["code"], "STATE_MISMATCH");
        assert_eq!(json["detail"], "State does not match.");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = AppError::from(parse_error);
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(error.source.is_some());
    }
}
