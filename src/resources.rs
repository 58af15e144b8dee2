// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles configuration, the cache, and the HubSpot integration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::Cache;
use crate::config::ServerConfig;
use crate::integrations::HubSpotIntegration;
use std::sync::Arc;

/// Long-lived resources created once at startup
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded server configuration
    pub config: Arc<ServerConfig>,
    /// Cache holding OAuth state and credentials
    pub cache: Cache,
    /// HubSpot integration bound to `cache`
    pub hubspot: HubSpotIntegration<Cache>,
}

impl ServerResources {
    /// Assemble resources using the shared HTTP client
    #[must_use]
    pub fn new(config: ServerConfig, cache: Cache) -> Self {
        let hubspot = HubSpotIntegration::new(cache.clone(), &config.hubspot);
        Self::assemble(config, cache, hubspot)
    }

    /// Assemble resources with an explicit HTTP client for provider calls
    #[must_use]
    pub fn with_http_client(config: ServerConfig, cache: Cache, http: reqwest::Client) -> Self {
        let hubspot = HubSpotIntegration::with_http_client(cache.clone(), &config.hubspot, http);
        Self::assemble(config, cache, hubspot)
    }

    fn assemble(config: ServerConfig, cache: Cache, hubspot: HubSpotIntegration<Cache>) -> Self {
        Self {
            config: Arc::new(config),
            cache,
            hubspot,
        }
    }
}
