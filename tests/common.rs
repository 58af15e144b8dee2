// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, HubSpot config pointed at mock servers, and a counting cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `integration_bridge`

use integration_bridge::cache::memory::InMemoryCache;
use integration_bridge::cache::{CacheConfig, CacheKey, CacheProvider};
use integration_bridge::config::HubSpotConfig;
use integration_bridge::errors::AppResult;
use integration_bridge::integrations::HubSpotIntegration;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Cache config without the background task
pub fn test_cache_config() -> CacheConfig {
    CacheConfig {
        enable_background_cleanup: false,
        ..CacheConfig::default()
    }
}

/// HubSpot config whose token and API endpoints point at `mock_uri`
pub fn hubspot_config(mock_uri: &str) -> HubSpotConfig {
    let mut config = HubSpotConfig::new("test-client-id", "test-client-secret");
    config.token_url = format!("{mock_uri}/oauth/v1/token");
    config.api_base_url = mock_uri.to_owned();
    config
}

/// In-memory cache that records how often each write operation ran
#[derive(Clone)]
pub struct CountingCache {
    pub inner: InMemoryCache,
    pub sets: Arc<AtomicUsize>,
    pub invalidations: Arc<AtomicUsize>,
    pub takes: Arc<AtomicUsize>,
}

impl CountingCache {
    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn invalidation_count(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub fn take_count(&self) -> usize {
        self.takes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CacheProvider for CountingCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self {
            inner: InMemoryCache::new(config).await?,
            sets: Arc::new(AtomicUsize::new(0)),
            invalidations: Arc::new(AtomicUsize::new(0)),
            takes: Arc::new(AtomicUsize::new(0)),
        })
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        self.inner.get(key).await
    }

    async fn take<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        self.takes.fetch_add(1, Ordering::SeqCst);
        self.inner.take(key).await
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        self.inner.invalidate(key).await
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        self.inner.ttl(key).await
    }

    async fn health_check(&self) -> AppResult<()> {
        self.inner.health_check().await
    }
}

/// Counting cache plus an integration wired to `mock_uri`
pub async fn counting_integration(
    mock_uri: &str,
) -> (CountingCache, HubSpotIntegration<CountingCache>) {
    init_test_logging();
    let cache = CountingCache::new(test_cache_config()).await.unwrap();
    let integration = HubSpotIntegration::with_http_client(
        cache.clone(),
        &hubspot_config(mock_uri),
        reqwest::Client::new(),
    );
    (cache, integration)
}

/// Extract the decoded `state` query value from an authorization URL
pub fn state_from_url(url: &str) -> String {
    url::Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .unwrap()
}
