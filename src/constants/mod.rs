// ABOUTME: Constants module with domain-separated organization
// ABOUTME: HubSpot endpoints, cache lifetimes, and connection defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain. Anything an operator may want to change
//! is also exposed through `config::environment`; the values here are the
//! defaults.

/// HubSpot endpoints, scopes, and mapping defaults
pub mod hubspot;

/// Cache lifetimes and in-memory capacity
pub mod cache {
    /// Default maximum cache entries for in-memory cache
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1_000;

    /// Default cleanup interval in seconds for expired entries
    pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300; // 5 minutes

    /// Lifetime of a pending authorization state
    pub const TTL_OAUTH_STATE_SECS: u64 = 600; // 10 minutes

    /// Lifetime of freshly issued credentials awaiting pickup
    pub const TTL_CREDENTIALS_SECS: u64 = 600; // 10 minutes
}

/// Redis connection configuration
pub mod redis {
    /// Redis connection timeout in seconds
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
    /// Redis response timeout in seconds
    pub const RESPONSE_TIMEOUT_SECS: u64 = 5;
    /// Number of reconnection retries
    pub const RECONNECTION_RETRIES: usize = 5;
    /// Exponential backoff base for retry delays
    pub const RETRY_EXPONENT_BASE: u64 = 2;
    /// Maximum retry delay in milliseconds
    pub const MAX_RETRY_DELAY_MS: u64 = 30_000;
    /// Initial connection retry count
    pub const INITIAL_CONNECTION_RETRIES: u32 = 3;
    /// Initial retry delay in milliseconds (doubles with exponential backoff)
    pub const INITIAL_RETRY_DELAY_MS: u64 = 500;
}

/// Outbound HTTP client defaults
pub mod http_client {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Service identifiers used in structured logs
pub mod service_names {
    /// Name of the HTTP server binary
    pub const INTEGRATION_SERVER: &str = "integration-server";
}

/// HTTP server defaults
pub mod server {
    /// Default HTTP port (matches the redirect URI registered with HubSpot)
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
}
