// ABOUTME: In-memory cache implementation with LRU eviction and TTL support
// ABOUTME: Includes background cleanup task for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheKey, CacheProvider};
use crate::errors::AppResult;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, RwLock};

type Store = Arc<RwLock<LruCache<String, CacheEntry>>>;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at.checked_duration_since(Instant::now())
    }
}

/// In-memory cache with LRU eviction and background cleanup
///
/// Suitable for a single-instance deployment; state written by one process is
/// invisible to others. Expired entries are dropped lazily on access and
/// periodically by the cleanup task.
#[derive(Clone)]
pub struct InMemoryCache {
    store: Store,
    shutdown_tx: Option<Arc<mpsc::Sender<()>>>,
}

impl InMemoryCache {
    /// Capacity used when the configuration asks for zero entries
    const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    fn new_with_config(config: &CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::FALLBACK_CAPACITY);
        let store: Store = Arc::new(RwLock::new(LruCache::new(capacity)));

        let shutdown_tx = config
            .enable_background_cleanup
            .then(|| Arc::new(Self::spawn_cleanup(store.clone(), config.cleanup_interval)));

        Self { store, shutdown_tx }
    }

    fn spawn_cleanup(store: Store, every: Duration) -> mpsc::Sender<()> {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                tokio::select! {
                    _ = interval.tick() => Self::cleanup_expired(&store).await,
                    _ = shutdown_rx.recv() => {
                        tracing::debug!("Cache cleanup task stopping");
                        break;
                    }
                }
            }
        });

        shutdown_tx
    }

    async fn cleanup_expired(store: &Store) {
        let mut guard = store.write().await;

        let expired: Vec<String> = guard
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            guard.pop(key);
        }
        drop(guard);

        if !expired.is_empty() {
            tracing::debug!(removed = expired.len(), "Cleaned up expired cache entries");
        }
    }

    /// Number of live and not-yet-collected entries
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl CacheProvider for InMemoryCache {
    async fn new(config: CacheConfig) -> AppResult<Self> {
        Ok(Self::new_with_config(&config))
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        let entry = CacheEntry::new(serde_json::to_vec(value)?, ttl);
        self.store.write().await.push(key.to_string(), entry);
        Ok(())
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let key = key.to_string();
        let mut store = self.store.write().await;

        let Some(entry) = store.get(&key) else {
            return Ok(None);
        };
        if entry.is_expired() {
            store.pop(&key);
            return Ok(None);
        }

        let value = serde_json::from_slice(&entry.data)?;
        drop(store);
        Ok(Some(value))
    }

    async fn take<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let entry = self.store.write().await.pop(&key.to_string());

        match entry {
            Some(entry) if !entry.is_expired() => Ok(Some(serde_json::from_slice(&entry.data)?)),
            _ => Ok(None),
        }
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        self.store.write().await.pop(&key.to_string());
        Ok(())
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        let key = key.to_string();
        let mut store = self.store.write().await;

        match store.peek(&key).map(CacheEntry::is_expired) {
            Some(false) => Ok(true),
            Some(true) => {
                store.pop(&key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        let store = self.store.read().await;
        Ok(store
            .peek(&key.to_string())
            .filter(|entry| !entry.is_expired())
            .and_then(CacheEntry::remaining_ttl))
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

impl Drop for InMemoryCache {
    fn drop(&mut self) {
        // Only the last clone stops the cleanup task
        if let Some(tx) = self.shutdown_tx.take() {
            if Arc::strong_count(&tx) == 1 {
                if let Err(e) = tx.try_send(()) {
                    tracing::debug!(error = ?e, "Cache shutdown signal not delivered");
                }
            }
        }
    }
}
