// ABOUTME: Cache abstraction for short-lived OAuth state and credentials
// ABOUTME: Pluggable backend support (in-memory, Redis) behind the CacheProvider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache factory selecting a backend from configuration
pub mod factory;
/// In-memory cache implementation
pub mod memory;
/// Redis cache implementation
pub mod redis;

pub use factory::Cache;

use crate::config::cache::RedisConnectionConfig;
use crate::constants::cache::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CLEANUP_INTERVAL_SECS};
use crate::constants::hubspot::{CREDENTIALS_NAMESPACE, STATE_NAMESPACE};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache provider trait for pluggable backend implementations
///
/// The cache owns expiry: every entry is written with a TTL and silently
/// disappears once it elapses.
///
/// # Examples
///
/// ```rust,no_run
/// use integration_bridge::cache::{CacheConfig, CacheKey, CacheNamespace, CacheProvider};
/// use integration_bridge::cache::memory::InMemoryCache;
/// use std::time::Duration;
/// # async fn example() -> Result<(), integration_bridge::errors::AppError> {
///
/// let config = CacheConfig {
///     enable_background_cleanup: false,
///     ..Default::default()
/// };
/// let cache = InMemoryCache::new(config).await?;
///
/// let key = CacheKey::new(CacheNamespace::HubspotCredentials, "org1", "user1");
/// cache.set(&key, &"token", Duration::from_secs(600)).await?;
///
/// let cached: Option<String> = cache.get(&key).await?;
/// assert_eq!(cached.as_deref(), Some("token"));
///
/// cache.invalidate(&key).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value in cache with TTL, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Retrieve value from cache, `None` when absent or expired
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or deserialization fails
    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>>;

    /// Remove and return a value in one step
    ///
    /// Two concurrent callers never both receive the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or deserialization fails
    async fn take<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>>;

    /// Remove single cache entry; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Check if key exists in cache
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    async fn exists(&self, key: &CacheKey) -> AppResult<bool>;

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>>;

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    async fn health_check(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries (for in-memory cache)
    pub max_entries: usize,
    /// Redis connection URL (for Redis cache)
    pub redis_url: Option<String>,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
    /// Redis connection and retry configuration
    pub redis_connection: RedisConnectionConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            redis_url: None,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
            redis_connection: RedisConnectionConfig::default(),
        }
    }
}

impl From<&crate::config::cache::CacheConfig> for CacheConfig {
    fn from(config: &crate::config::cache::CacheConfig) -> Self {
        Self {
            max_entries: config.max_entries,
            redis_url: config.redis_url.clone(),
            cleanup_interval: Duration::from_secs(config.cleanup_interval_secs),
            enable_background_cleanup: true,
            redis_connection: config.redis_connection.clone(),
        }
    }
}

/// Kind of value stored under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Pending authorization state, consumed by the callback
    HubspotState,
    /// Issued token payload, consumed by the credential handoff
    HubspotCredentials,
}

impl CacheNamespace {
    /// Key prefix for this namespace
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HubspotState => STATE_NAMESPACE,
            Self::HubspotCredentials => CREDENTIALS_NAMESPACE,
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured cache key scoped to one user within one organization
///
/// Renders as `<namespace>:<org_id>:<user_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// What the entry holds
    pub namespace: CacheNamespace,
    /// Organization ID
    pub org_id: String,
    /// User ID
    pub user_id: String,
}

impl CacheKey {
    /// Create new cache key
    #[must_use]
    pub fn new(
        namespace: CacheNamespace,
        org_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            namespace,
            org_id: org_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Key of the pending authorization state for a user
    #[must_use]
    pub fn state(org_id: &str, user_id: &str) -> Self {
        Self::new(CacheNamespace::HubspotState, org_id, user_id)
    }

    /// Key of the issued credentials for a user
    #[must_use]
    pub fn credentials(org_id: &str, user_id: &str) -> Self {
        Self::new(CacheNamespace::HubspotCredentials, org_id, user_id)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.org_id, self.user_id)
    }
}
