// ABOUTME: HubSpot integration routes used by the platform front-end
// ABOUTME: Authorize, OAuth callback, credential handoff, and contact loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HubSpot Integration Routes
//!
//! ## Endpoints
//!
//! - `POST /integrations/hubspot/authorize` - Start a connection, returns the authorization URL
//! - `GET /integrations/hubspot/oauth2callback` - Provider redirect target, closes the popup
//! - `POST /integrations/hubspot/credentials` - One-time credential handoff
//! - `POST /integrations/hubspot/load` - Fetch and normalize contacts

use crate::errors::AppError;
use crate::integrations::CallbackParams;
use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use integration_core::models::IntegrationItem;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Form identifying the platform user
///
/// Fields default to empty so that missing fields get the same JSON error as
/// blank ones.
#[derive(Debug, Clone, Deserialize)]
pub struct UserOrgForm {
    /// Platform user ID
    #[serde(default)]
    pub user_id: String,
    /// Platform organization ID
    #[serde(default)]
    pub org_id: String,
}

impl UserOrgForm {
    /// IDs are opaque: blank ones are rejected, others are used as sent
    fn validated(&self) -> Result<(&str, &str), AppError> {
        if self.user_id.trim().is_empty() {
            return Err(AppError::missing_field("user_id"));
        }
        if self.org_id.trim().is_empty() {
            return Err(AppError::missing_field("org_id"));
        }
        Ok((&self.user_id, &self.org_id))
    }
}

/// Form carrying serialized credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoadItemsForm {
    /// Token payload as returned by the credentials route, serialized as JSON
    #[serde(default)]
    pub credentials: String,
}

/// HubSpot integration routes
pub struct IntegrationRoutes;

impl IntegrationRoutes {
    /// Create all HubSpot integration routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/integrations/hubspot/authorize",
                post(Self::handle_authorize),
            )
            .route(
                "/integrations/hubspot/oauth2callback",
                get(Self::handle_oauth2_callback),
            )
            .route(
                "/integrations/hubspot/credentials",
                post(Self::handle_get_credentials),
            )
            .route("/integrations/hubspot/load", post(Self::handle_load_items))
            .with_state(resources)
    }

    async fn handle_authorize(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<UserOrgForm>,
    ) -> Result<Json<String>, AppError> {
        let (user_id, org_id) = form.validated()?;
        let url = resources.hubspot.authorize(user_id, org_id).await?;
        Ok(Json(url))
    }

    async fn handle_oauth2_callback(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<CallbackParams>,
    ) -> Result<Html<String>, AppError> {
        let page = resources.hubspot.oauth2_callback(params).await?;
        Ok(Html(page))
    }

    async fn handle_get_credentials(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<UserOrgForm>,
    ) -> Result<Json<Value>, AppError> {
        let (user_id, org_id) = form.validated()?;
        let credentials = resources.hubspot.get_credentials(user_id, org_id).await?;
        Ok(Json(credentials))
    }

    async fn handle_load_items(
        State(resources): State<Arc<ServerResources>>,
        Form(form): Form<LoadItemsForm>,
    ) -> Result<Json<Vec<IntegrationItem>>, AppError> {
        if form.credentials.trim().is_empty() {
            return Err(AppError::missing_field("credentials"));
        }
        let items = resources.hubspot.get_items(&form.credentials).await?;
        Ok(Json(items))
    }
}
