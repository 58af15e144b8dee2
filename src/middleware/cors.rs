// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Lets the platform front-end call the integration routes from its own origin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::SecurityConfig;
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS from the configured origin list
///
/// An empty list, or one containing `*`, allows any origin. Entries that are
/// not valid header values are skipped; if none remain, any origin is allowed.
///
/// ```bash
/// export CORS_ORIGINS="http://localhost:3000,https://app.example.com"
/// ```
pub fn setup_cors(config: &SecurityConfig) -> CorsLayer {
    let allow_origin = if config.cors_origins.is_empty()
        || config.cors_origins.iter().any(|origin| origin == "*")
    {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
