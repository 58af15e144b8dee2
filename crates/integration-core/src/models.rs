// ABOUTME: Shared data models for the integration bridge
// ABOUTME: OAuth authorization state and the normalized IntegrationItem shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// CSRF state bound to one authorization request
///
/// Serialized as `{"state", "user_id", "org_id"}`; the same JSON travels to the
/// provider inside the authorization URL and is stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationState {
    /// Random single-use nonce
    #[serde(rename = "state")]
    pub nonce: String,
    /// User that started the flow
    pub user_id: String,
    /// Organization the user belongs to
    pub org_id: String,
}

impl AuthorizationState {
    /// Create a state for the given user/org pair
    #[must_use]
    pub fn new(nonce: String, user_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            nonce,
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }
}

/// Kind of record an [`IntegrationItem`] was derived from
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationItemType {
    /// CRM contact
    Contact,
}

/// Normalized third-party record for downstream consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationItem {
    /// Provider-side record id
    pub id: String,
    /// Record kind
    #[serde(rename = "type")]
    pub item_type: IntegrationItemType,
    /// Display name
    pub name: String,
    /// When the record was created, if the provider reported a parseable date
    pub creation_time: Option<DateTime<Utc>>,
    /// When the record was last modified, if the provider reported a parseable date
    pub last_modified_time: Option<DateTime<Utc>>,
    /// Link to the record in the provider's UI
    pub url: String,
}
