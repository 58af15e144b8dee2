// ABOUTME: OAuth 2.0 client used to connect HubSpot accounts
// ABOUTME: Builds authorization URLs and exchanges authorization codes for tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! The bridge acts as an OAuth 2.0 client on behalf of a platform user:
//! - authorization URL construction with a CSRF state
//! - authorization-code exchange at the provider token endpoint
//!
//! Token refresh is intentionally absent; tokens are handed to the consumer
//! as issued.

/// Core OAuth 2.0 client implementation
pub mod client;

pub use client::{
    generate_state_nonce, normalize_token_payload, OAuth2Client, OAuth2Config,
    TokenExchangeResponse,
};
