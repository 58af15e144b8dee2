// ABOUTME: HubSpot contact records and their mapping to IntegrationItem
// ABOUTME: Pure conversion with lenient date parsing; never fails on bad record data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::hubspot::UNNAMED_CONTACT;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use integration_core::models::{IntegrationItem, IntegrationItemType};
use serde::Deserialize;
use serde_json::{Map, Value};

/// One contact as returned by the CRM objects API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HubSpotContact {
    /// Record id; HubSpot sends a string but numbers are accepted
    #[serde(default)]
    pub id: Value,
    /// Requested contact properties; values are strings or null
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Record creation timestamp
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    /// Record update timestamp
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

impl HubSpotContact {
    /// Property as a non-empty trimmed string
    fn property(&self, name: &str) -> Option<String> {
        value_as_string(self.properties.get(name)?)
    }

    fn id_string(&self) -> String {
        value_as_string(&self.id).unwrap_or_default()
    }

    /// `firstname lastname`, else email, else the placeholder
    fn display_name(&self) -> String {
        let first = self.property("firstname").unwrap_or_default();
        let last = self.property("lastname").unwrap_or_default();
        let full = format!("{first} {last}");
        let full = full.trim();

        if !full.is_empty() {
            return full.to_owned();
        }
        self.property("email").unwrap_or_else(|| UNNAMED_CONTACT.to_owned())
    }

    fn date(&self, property: &str, top_level: Option<&str>) -> Option<DateTime<Utc>> {
        match self.property(property) {
            Some(raw) => parse_hubspot_datetime(&raw),
            None => top_level.and_then(parse_hubspot_datetime),
        }
    }
}

/// One page of the contacts list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ContactsPage {
    /// Contacts on this page, in provider order
    #[serde(default)]
    pub results: Vec<HubSpotContact>,
}

fn value_as_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Convert a HubSpot contact into the normalized item shape
///
/// `app_base_url` is the HubSpot web app root used for the record link.
#[must_use]
pub fn create_integration_item_metadata_object(
    contact: &HubSpotContact,
    app_base_url: &str,
) -> IntegrationItem {
    let id = contact.id_string();

    IntegrationItem {
        url: format!("{}/contacts/{id}", app_base_url.trim_end_matches('/')),
        name: contact.display_name(),
        creation_time: contact.date("createdate", contact.created_at.as_deref()),
        last_modified_time: contact.date("lastmodifieddate", contact.updated_at.as_deref()),
        item_type: IntegrationItemType::Contact,
        id,
    }
}

/// Parse a HubSpot timestamp
///
/// Accepts an all-digit millisecond epoch or ISO-8601 (`Z` or an explicit
/// offset; offset-less values are read as UTC). Anything else yields `None`.
#[must_use]
pub fn parse_hubspot_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis);
    }

    let normalized = raw
        .strip_suffix('Z')
        .map_or_else(|| raw.to_owned(), |stripped| format!("{stripped}+00:00"));

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
