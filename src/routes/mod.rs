// ABOUTME: Route module organization for the integration bridge HTTP API
// ABOUTME: Assembles domain routers with request tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health check and readiness routes
pub mod health;
/// HubSpot integration routes
pub mod integrations;

pub use health::HealthRoutes;
pub use integrations::IntegrationRoutes;

use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.security);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(IntegrationRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
