// ABOUTME: HubSpot connect flow: authorization, callback, credential handoff, contact fetch
// ABOUTME: Short-lived state and credentials live in the cache under org/user scoped keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::contacts::{create_integration_item_metadata_object, ContactsPage};
use crate::cache::{CacheKey, CacheProvider};
use crate::config::HubSpotConfig;
use crate::constants::cache::{TTL_CREDENTIALS_SECS, TTL_OAUTH_STATE_SECS};
use crate::constants::hubspot::{CONTACTS_PAGE_LIMIT, CONTACTS_PATH, PROVIDER_NAME};
use crate::errors::{AppError, AppResult, ErrorCode, IntegrationError};
use crate::logging::AppLogger;
use crate::oauth2_client::{generate_state_nonce, normalize_token_payload, OAuth2Client};
use crate::utils::http_client::shared_client;
use integration_core::models::{AuthorizationState, IntegrationItem};
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Page returned to the OAuth popup once credentials are stored
pub const CLOSE_WINDOW_HTML: &str = r"<html>
    <script>
        window.close();
    </script>
</html>
";

/// Query parameters HubSpot appends to the redirect URI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    /// Authorization code
    pub code: Option<String>,
    /// Serialized [`AuthorizationState`] as issued by `authorize`
    pub state: Option<String>,
    /// Provider error code when the user denied or the request was invalid
    pub error: Option<String>,
    /// Provider error explanation
    pub error_description: Option<String>,
}

/// HubSpot OAuth and contacts integration
///
/// Holds no per-user state of its own; everything that must survive between
/// requests goes through the cache.
#[derive(Clone)]
pub struct HubSpotIntegration<C: CacheProvider> {
    cache: C,
    oauth: OAuth2Client,
    http: reqwest::Client,
    api_base_url: String,
    app_base_url: String,
}

impl<C: CacheProvider> HubSpotIntegration<C> {
    /// Create the integration using the shared HTTP client
    #[must_use]
    pub fn new(cache: C, config: &HubSpotConfig) -> Self {
        Self::with_http_client(cache, config, shared_client().clone())
    }

    /// Create the integration with an explicit HTTP client
    #[must_use]
    pub fn with_http_client(cache: C, config: &HubSpotConfig, http: reqwest::Client) -> Self {
        Self {
            cache,
            oauth: OAuth2Client::with_http_client(config.oauth2_config(), http.clone()),
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            app_base_url: config.app_base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Cache backing this integration
    #[must_use]
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// Start a connection: store a fresh state and return the authorization URL
    ///
    /// Issuing a new URL for the same user/org replaces any pending state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be stored or the configured
    /// authorization URL is malformed
    pub async fn authorize(&self, user_id: &str, org_id: &str) -> AppResult<String> {
        let state = AuthorizationState::new(generate_state_nonce(), user_id, org_id);
        let encoded_state = serde_json::to_string(&state)?;

        self.cache
            .set(
                &CacheKey::state(org_id, user_id),
                &state,
                Duration::from_secs(TTL_OAUTH_STATE_SECS),
            )
            .await?;

        debug!(user_id, org_id, "Stored HubSpot authorization state");
        self.oauth.get_authorization_url(&encoded_state)
    }

    /// Handle the provider redirect and store the issued credentials
    ///
    /// Returns the HTML page that closes the popup.
    ///
    /// # Errors
    ///
    /// - provider-reported `error`
    /// - missing or undecodable `state`, or missing `code`
    /// - no pending state for the user/org, or a different nonce
    /// - token endpoint unreachable or answering non-200
    /// - cache failures
    pub async fn oauth2_callback(&self, params: CallbackParams) -> AppResult<String> {
        if let Some(error) = params.error.filter(|e| !e.is_empty()) {
            warn!(
                error = %error,
                description = params.error_description.as_deref().unwrap_or(""),
                "HubSpot authorization denied"
            );
            return Err(IntegrationError::AuthorizationDenied(error).into());
        }

        let raw_state = params
            .state
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::missing_field("state"))?;
        let code = params
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::missing_field("code"))?;

        let returned = decode_state(&raw_state)?;
        let state_key = CacheKey::state(&returned.org_id, &returned.user_id);

        let stored: Option<AuthorizationState> = self.cache.get(&state_key).await?;
        if !stored.is_some_and(|stored| stored.nonce == returned.nonce) {
            AppLogger::log_security_event(
                "oauth_state_mismatch",
                "medium",
                "HubSpot callback state absent or does not match the issued nonce",
                Some(&returned.user_id),
            );
            return Err(IntegrationError::StateMismatch.into());
        }

        // The state is single-use whatever the exchange outcome
        let (exchange, state_cleanup) = tokio::join!(
            self.oauth.exchange_code(&code),
            self.cache.invalidate(&state_key)
        );

        let exchange =
            exchange.inspect_err(|e| warn!(error = %e, "HubSpot token request failed"))?;
        state_cleanup
            .inspect_err(|e| warn!(error = %e, "Failed to clear HubSpot authorization state"))?;

        if !exchange.is_success() {
            AppLogger::log_oauth_event(
                &returned.user_id,
                &returned.org_id,
                PROVIDER_NAME,
                "token_exchange",
                false,
            );
            debug!(
                status = exchange.status,
                body = %exchange.payload,
                "Token endpoint rejected code"
            );
            return Err(IntegrationError::TokenExchangeFailed {
                status: exchange.status,
            }
            .into());
        }

        self.cache
            .set(
                &CacheKey::credentials(&returned.org_id, &returned.user_id),
                &exchange.payload,
                Duration::from_secs(TTL_CREDENTIALS_SECS),
            )
            .await?;

        AppLogger::log_oauth_event(
            &returned.user_id,
            &returned.org_id,
            PROVIDER_NAME,
            "token_exchange",
            true,
        );
        Ok(CLOSE_WINDOW_HTML.to_owned())
    }

    /// Hand over issued credentials, at most once
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials are stored (never issued, expired,
    /// or already retrieved) or the cache fails
    pub async fn get_credentials(&self, user_id: &str, org_id: &str) -> AppResult<Value> {
        let key = CacheKey::credentials(org_id, user_id);

        let credentials: Value = self
            .cache
            .take(&key)
            .await?
            .ok_or(IntegrationError::CredentialsNotFound)?;

        info!(user_id, org_id, "HubSpot credentials handed over");
        Ok(credentials)
    }

    /// Fetch the first page of contacts and normalize them
    ///
    /// `credentials` is the serialized token payload returned by
    /// [`Self::get_credentials`].
    ///
    /// # Errors
    ///
    /// - credentials are not a JSON object or lack an access token (no request is made)
    /// - the contacts endpoint is unreachable, answers non-200, or returns an
    ///   unparseable body
    pub async fn get_items(&self, credentials: &str) -> AppResult<Vec<IntegrationItem>> {
        let access_token = extract_access_token(credentials)?;
        let url = format!("{}{CONTACTS_PATH}", self.api_base_url);
        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .bearer_auth(&access_token)
            .query(&[("limit", CONTACTS_PAGE_LIMIT)])
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    "HubSpot contacts endpoint unreachable",
                )
                .with_source(e)
            })?;

        let status = response.status().as_u16();
        AppLogger::log_provider_request(
            PROVIDER_NAME,
            CONTACTS_PATH,
            status,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        if status != 200 {
            return Err(IntegrationError::UpstreamFetchFailed { status }.into());
        }

        let page: ContactsPage = response.json().await.map_err(|e| {
            AppError::external_service("HubSpot", "Invalid contacts response").with_source(e)
        })?;

        Ok(page
            .results
            .iter()
            .map(|contact| create_integration_item_metadata_object(contact, &self.app_base_url))
            .collect())
    }
}

/// Decode the `state` query value into the issued state
///
/// The query extractor has already percent-decoded the value once; it is
/// decoded one more time to undo the double encoding some browsers and
/// proxies apply to JSON in query strings.
fn decode_state(raw: &str) -> Result<AuthorizationState, IntegrationError> {
    let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |d| d.into_owned());

    serde_json::from_str(&decoded).map_err(|e| IntegrationError::MalformedState(e.to_string()))
}

fn extract_access_token(credentials: &str) -> AppResult<String> {
    let payload = normalize_token_payload(credentials).map_err(|e| {
        AppError::new(ErrorCode::InvalidFormat, "Credentials must be a JSON object").with_source(e)
    })?;

    payload
        .get("access_token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| IntegrationError::MissingAccessToken.into())
}
