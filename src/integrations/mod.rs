// ABOUTME: Third-party CRM integrations exposed by the bridge
// ABOUTME: Currently HubSpot: OAuth connect flow and contact normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Contact records and their mapping to integration items
pub mod contacts;
/// OAuth connect flow and contacts fetch
pub mod hubspot;

pub use contacts::{create_integration_item_metadata_object, parse_hubspot_datetime, HubSpotContact};
pub use hubspot::{CallbackParams, HubSpotIntegration, CLOSE_WINDOW_HTML};
