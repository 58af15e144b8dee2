// ABOUTME: Cache factory for configuration-based backend selection
// ABOUTME: Uses Redis when a URL is configured, the in-memory LRU cache otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::memory::InMemoryCache;
use super::redis::RedisCache;
use super::{CacheConfig, CacheKey, CacheProvider};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unified cache handle over the configured backend
#[derive(Clone)]
pub enum Cache {
    /// Process-local LRU cache
    Memory(InMemoryCache),
    /// Shared Redis cache
    Redis(RedisCache),
}

impl Cache {
    /// Name of the active backend, for logging
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
        }
    }
}

#[async_trait::async_trait]
impl CacheProvider for Cache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        if config.redis_url.is_some() {
            tracing::info!("Initializing Redis cache");
            Ok(Self::Redis(RedisCache::new(config).await?))
        } else {
            tracing::info!(
                max_entries = config.max_entries,
                "Initializing in-memory cache"
            );
            Ok(Self::Memory(InMemoryCache::new(config).await?))
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.set(key, value, ttl).await,
            Self::Redis(cache) => cache.set(key, value, ttl).await,
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::Redis(cache) => cache.get(key).await,
        }
    }

    async fn take<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        match self {
            Self::Memory(cache) => cache.take(key).await,
            Self::Redis(cache) => cache.take(key).await,
        }
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.invalidate(key).await,
            Self::Redis(cache) => cache.invalidate(key).await,
        }
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        match self {
            Self::Memory(cache) => cache.exists(key).await,
            Self::Redis(cache) => cache.exists(key).await,
        }
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        match self {
            Self::Memory(cache) => cache.ttl(key).await,
            Self::Redis(cache) => cache.ttl(key).await,
        }
    }

    async fn health_check(&self) -> AppResult<()> {
        match self {
            Self::Memory(cache) => cache.health_check().await,
            Self::Redis(cache) => cache.health_check().await,
        }
    }
}
