//! HTTP client for the Nominatim `search` endpoint.
//!
//! Every request is routed through the shared [`RateLimiter`], so all
//! clients built from the same limiter together respect the provider's
//! request-rate policy.

use std::sync::Arc;
use std::time::Duration;

use geotag_core::{AppConfig, Coordinate};
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::rate_limit::RateLimiter;
use crate::types::SearchResult;

const DEFAULT_BASE_URL: &str = geotag_core::config::DEFAULT_GEOCODER_BASE_URL;

/// Client for a Nominatim-compatible geocoding service.
///
/// Use [`NominatimClient::new`] for the public instance or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    search_url: Url,
    limiter: Arc<RateLimiter>,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        user_agent: &str,
        timeout_secs: u64,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_BASE_URL, limiter)
    }

    /// Creates a client from the process configuration.
    ///
    /// # Errors
    ///
    /// See [`NominatimClient::with_base_url`].
    pub fn from_app_config(
        config: &AppConfig,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(
            &config.geocoder_user_agent,
            config.geocoder_timeout_secs,
            &config.geocoder_base_url,
            limiter,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
        limiter: Arc<RateLimiter>,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends `search` to the
        // base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join("search"))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            search_url,
            limiter,
        })
    }

    #[must_use]
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// Looks up `query`, waiting for a rate-limiter slot first.
    ///
    /// Returns `Ok(None)` when the provider has no match.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure.
    /// - [`GeocodeError::UnexpectedStatus`] on a non-2xx response.
    /// - [`GeocodeError::Deserialize`] if the body is not a search result list.
    pub async fn search(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = self.build_url(query);
        let body = self.limiter.throttle(|| self.request(url, query)).await?;
        let coordinate = parse_search_response(&body, query)?;

        match &coordinate {
            Some(coordinate) => tracing::debug!(query, %coordinate, "geocoding match"),
            None => tracing::info!(query, "geocoding provider returned no match"),
        }
        Ok(coordinate)
    }

    fn build_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("q", query)
            .append_pair("addressdetails", "1")
            .append_pair("limit", "1");
        url
    }

    async fn request(&self, url: Url, query: &str) -> Result<String, GeocodeError> {
        tracing::debug!(query, "dispatching geocoding request");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(query, status = status.as_u16(), "geocoding request failed");
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                query: query.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Parses a `jsonv2` search response; an empty list means no match.
pub(crate) fn parse_search_response(
    body: &str,
    query: &str,
) -> Result<Option<Coordinate>, GeocodeError> {
    let results: Vec<SearchResult> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Deserialize {
            context: format!("search(q={query})"),
            source: e,
        })?;

    if let Some(name) = results.first().and_then(|r| r.display_name.as_deref()) {
        tracing::debug!(query, display_name = name, "first search result");
    }
    Ok(results.first().map(SearchResult::coordinate))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
