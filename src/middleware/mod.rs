// ABOUTME: HTTP middleware for the integration routes
// ABOUTME: Currently cross-origin resource sharing setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
