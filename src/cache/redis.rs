// ABOUTME: Redis cache implementation with connection management and TTL support
// ABOUTME: Shares OAuth state and credentials across multiple server instances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CacheConfig, CacheKey, CacheProvider};
use crate::config::cache::RedisConnectionConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info, warn};

/// Redis cache backed by a `ConnectionManager`
///
/// Keys are stored exactly as [`CacheKey`] renders them so that entries stay
/// readable by other services sharing the same Redis database.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    async fn new_with_config(config: &CacheConfig) -> AppResult<Self> {
        let redis_url = config
            .redis_url
            .as_deref()
            .ok_or_else(|| AppError::config("Redis URL is required for Redis cache backend"))?;

        let conn_config = &config.redis_connection;
        info!(
            timeout_secs = conn_config.connection_timeout_secs,
            response_timeout_secs = conn_config.response_timeout_secs,
            retries = conn_config.initial_connection_retries,
            "Connecting to Redis"
        );

        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::config(format!("Invalid Redis URL: {e}")).with_source(e))?;
        let manager = Self::connect_with_retry(&client, conn_config).await?;

        info!("Successfully connected to Redis");
        Ok(Self { manager })
    }

    /// Connect with exponential backoff, capped at `max_retry_delay_ms`
    async fn connect_with_retry(
        client: &redis::Client,
        conn_config: &RedisConnectionConfig,
    ) -> AppResult<ConnectionManager> {
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(Duration::from_secs(conn_config.connection_timeout_secs))
            .set_response_timeout(Duration::from_secs(conn_config.response_timeout_secs))
            .set_number_of_retries(conn_config.reconnection_retries)
            .set_exponent_base(conn_config.retry_exponent_base)
            .set_max_delay(conn_config.max_retry_delay_ms);

        let max_retries = conn_config.initial_connection_retries;
        let mut delay_ms = conn_config.initial_retry_delay_ms;
        let mut attempt = 0;

        loop {
            match ConnectionManager::new_with_config(client.clone(), manager_config.clone()).await
            {
                Ok(manager) => {
                    if attempt > 0 {
                        info!(attempt, "Redis connection established after retry");
                    }
                    return Ok(manager);
                }
                Err(e) if attempt < max_retries => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = max_retries + 1,
                        delay_ms,
                        error = %e,
                        "Redis connection attempt failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = (delay_ms * 2).min(conn_config.max_retry_delay_ms);
                    attempt += 1;
                }
                Err(e) => {
                    return Err(AppError::new(
                        ErrorCode::ExternalServiceUnavailable,
                        format!("Failed to connect to Redis after {} attempts", max_retries + 1),
                    )
                    .with_source(e));
                }
            }
        }
    }

    fn command_error(operation: &str, e: redis::RedisError) -> AppError {
        error!(operation, error = %e, "Redis operation failed");
        AppError::storage(format!("Redis {operation} failed: {e}")).with_source(e)
    }
}

#[async_trait::async_trait]
impl CacheProvider for RedisCache {
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized,
    {
        Self::new_with_config(&config).await
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()> {
        let serialized = serde_json::to_vec(value)?;
        let mut conn = self.manager.clone();

        // SETEX stores and sets expiry atomically
        conn.set_ex::<_, _, ()>(key.to_string(), serialized, ttl.as_secs().max(1))
            .await
            .map_err(|e| Self::command_error("SETEX", e))
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let mut conn = self.manager.clone();

        let data: Option<Vec<u8>> = conn
            .get(key.to_string())
            .await
            .map_err(|e| Self::command_error("GET", e))?;

        data.map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(AppError::from)
    }

    async fn take<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>> {
        let mut conn = self.manager.clone();

        // GETDEL reads and removes atomically on the server
        let data: Option<Vec<u8>> = conn
            .get_del(key.to_string())
            .await
            .map_err(|e| Self::command_error("GETDEL", e))?;

        data.map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(AppError::from)
    }

    async fn invalidate(&self, key: &CacheKey) -> AppResult<()> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key.to_string())
            .await
            .map_err(|e| Self::command_error("DEL", e))
    }

    async fn exists(&self, key: &CacheKey) -> AppResult<bool> {
        let mut conn = self.manager.clone();
        conn.exists(key.to_string())
            .await
            .map_err(|e| Self::command_error("EXISTS", e))
    }

    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>> {
        let mut conn = self.manager.clone();

        let ttl_secs: i64 = conn
            .ttl(key.to_string())
            .await
            .map_err(|e| Self::command_error("TTL", e))?;

        // -2: no such key, -1: no expiry
        Ok(u64::try_from(ttl_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs))
    }

    async fn health_check(&self) -> AppResult<()> {
        let mut conn = self.manager.clone();

        let response: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| Self::command_error("PING", e))?;

        if response == "PONG" {
            Ok(())
        } else {
            Err(AppError::storage(format!(
                "Unexpected PING response '{response}'"
            )))
        }
    }
}
