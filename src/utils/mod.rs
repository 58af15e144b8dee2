// ABOUTME: Utility modules shared across the integration bridge
// ABOUTME: Contains the pooled HTTP client used for provider calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client configuration and helpers
pub mod http_client;
