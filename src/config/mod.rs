// ABOUTME: Configuration management module for server, provider, and cache settings
// ABOUTME: All values come from environment variables, with an optional .env file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the integration bridge
//!
//! - **Environment**: server, HubSpot app, HTTP client, and CORS settings
//! - **Cache**: backend selection and Redis connection tuning

/// Cache backend configuration
pub mod cache;
/// Environment and server configuration
pub mod environment;

pub use cache::{CacheConfig, RedisConnectionConfig};
pub use environment::{HttpClientConfig, HubSpotConfig, SecurityConfig, ServerConfig};
