// ABOUTME: HubSpot endpoint URLs, OAuth scopes, and contact mapping defaults
// ABOUTME: Used as configuration defaults and by the contact mapper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Provider identifier used in logs
pub const PROVIDER_NAME: &str = "hubspot";

/// Browser-facing authorization endpoint
pub const AUTHORIZATION_URL: &str = "https://app.hubspot.com/oauth/authorize";

/// Token exchange endpoint
pub const TOKEN_URL: &str = "https://api.hubapi.com/oauth/v1/token";

/// REST API base URL
pub const API_BASE_URL: &str = "https://api.hubapi.com";

/// Web application base URL, used to build record links
pub const APP_BASE_URL: &str = "https://app.hubspot.com";

/// Path of the contacts list endpoint, relative to the API base URL
pub const CONTACTS_PATH: &str = "/crm/v3/objects/contacts";

/// Page size requested from the contacts list endpoint (HubSpot maximum)
pub const CONTACTS_PAGE_LIMIT: u32 = 100;

/// Space-separated OAuth scopes requested by default
pub const DEFAULT_SCOPES: &str = "crm.objects.contacts.read crm.objects.contacts.write content";

/// Callback path served by this bridge
pub const CALLBACK_PATH: &str = "/integrations/hubspot/oauth2callback";

/// Cache namespace holding pending authorization states
pub const STATE_NAMESPACE: &str = "hubspot_state";

/// Cache namespace holding issued credentials awaiting pickup
pub const CREDENTIALS_NAMESPACE: &str = "hubspot_credentials";

/// Name given to contacts without a name or email
pub const UNNAMED_CONTACT: &str = "Unnamed Contact";
