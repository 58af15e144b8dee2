// ABOUTME: Shared HTTP client with connection pooling for HubSpot API calls
// ABOUTME: Singleton initialized at server startup with configured timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Timeouts applied when the shared client is first built
static CLIENT_CONFIG: OnceLock<HttpClientConfig> = OnceLock::new();

/// Global shared HTTP client
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Record the timeout configuration for the shared client
///
/// Call once at startup, before the first outbound request. Later calls, or
/// calls after the client was built, have no effect.
pub fn initialize_shared_client(config: HttpClientConfig) {
    if CLIENT_CONFIG.set(config).is_err() {
        tracing::debug!("Shared HTTP client configuration already set");
    }
}

/// Get the shared HTTP client
///
/// Falls back to default timeouts if [`initialize_shared_client`] was never called.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        let config = CLIENT_CONFIG.get().copied().unwrap_or_default();
        create_client(&config)
    })
}

/// Build a standalone client with the given timeouts
#[must_use]
pub fn create_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}
