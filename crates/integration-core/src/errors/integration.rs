// ABOUTME: Domain error enum for the HubSpot OAuth and item fetch flow
// ABOUTME: Converts each failure into a client-facing AppError with its HTTP status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

/// Failures of the authorization, credential handoff, and item fetch flow
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrationError {
    /// The provider redirected back with an `error` parameter
    #[error("{0}")]
    AuthorizationDenied(String),

    /// The callback carried a `state` that could not be decoded
    #[error("Malformed state parameter: {0}")]
    MalformedState(String),

    /// No stored state for the user/org pair, or its nonce differs
    #[error("State does not match.")]
    StateMismatch,

    /// The token endpoint answered with a non-200 status
    #[error("Token exchange failed.")]
    TokenExchangeFailed {
        /// Status returned by the token endpoint
        status: u16,
    },

    /// Credentials were never issued or have already been consumed
    #[error("No credentials found.")]
    CredentialsNotFound,

    /// Credentials were supplied without an `access_token`
    #[error("Access token missing from credentials.")]
    MissingAccessToken,

    /// The provider's list endpoint answered with a non-200 status
    #[error("Failed to fetch contacts from HubSpot (status {status})")]
    UpstreamFetchFailed {
        /// Status returned by the provider
        status: u16,
    },
}

impl From<IntegrationError> for AppError {
    fn from(error: IntegrationError) -> Self {
        let message = error.to_string();
        match error {
            IntegrationError::AuthorizationDenied(_) => Self::new(ErrorCode::OAuthDenied, message),
            IntegrationError::MalformedState(_) => Self::new(ErrorCode::InvalidFormat, message),
            IntegrationError::StateMismatch => Self::new(ErrorCode::StateMismatch, message),
            IntegrationError::TokenExchangeFailed { .. } => {
                Self::new(ErrorCode::TokenExchangeFailed, message)
            }
            IntegrationError::CredentialsNotFound => {
                Self::new(ErrorCode::CredentialsNotFound, message)
            }
            IntegrationError::MissingAccessToken => {
                Self::new(ErrorCode::MissingAccessToken, message)
            }
            IntegrationError::UpstreamFetchFailed { status } => {
                let error = Self::new(ErrorCode::ExternalServiceError, message);
                // Only error statuses pass through; a 2xx/3xx must not read as success
                if (400..=599).contains(&status) {
                    error.with_upstream_status(status)
                } else {
                    error
                }
            }
        }
    }
}
