// ABOUTME: Main library entry point for the HubSpot CRM integration bridge
// ABOUTME: OAuth2 connect flow, short-lived credential handoff, and contact normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Integration Bridge
//!
//! Connects a platform user's HubSpot account and turns CRM contacts into
//! generic integration items.
//!
//! ## Flow
//!
//! 1. `authorize` stores a CSRF state for the user/org pair and returns the
//!    HubSpot authorization URL
//! 2. HubSpot redirects to the callback; the state is checked and consumed,
//!    the code is exchanged, and the token payload is cached briefly
//! 3. The front-end picks the credentials up exactly once
//! 4. `get_items` lists contacts with those credentials and normalizes them
//!
//! ## Architecture
//!
//! - **Cache**: `CacheProvider` trait with in-memory and Redis backends
//! - **`OAuth2` client**: authorization URL building and code exchange
//! - **Integrations**: the HubSpot flow and contact mapping
//! - **Routes**: axum HTTP surface consumed by the front-end
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use integration_bridge::cache::{Cache, CacheConfig, CacheProvider};
//! use integration_bridge::config::HubSpotConfig;
//! use integration_bridge::integrations::HubSpotIntegration;
//! use integration_bridge::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let cache = Cache::new(CacheConfig::default()).await?;
//!     let hubspot = HubSpotIntegration::new(cache, &HubSpotConfig::new("client-id", "secret"));
//!
//!     let url = hubspot.authorize("user-1", "org-1").await?;
//!     println!("Open {url} to connect HubSpot");
//!     Ok(())
//! }
//! ```

/// Cache abstraction and backends
pub mod cache;
/// Configuration management
pub mod config;
/// Application constants grouped by domain
pub mod constants;
/// Unified error types
pub mod errors;
/// Third-party CRM integrations
pub mod integrations;
/// Structured logging setup
pub mod logging;
/// HTTP middleware
pub mod middleware;
/// OAuth 2.0 client
pub mod oauth2_client;
/// Shared server resources
pub mod resources;
/// HTTP routes
pub mod routes;
/// Shared utilities
pub mod utils;

pub use integration_core::models;
