//! HTTP client for the Google Places (New) and Geocoding APIs.
//!
//! Every call authenticates with the same API key: Places via the
//! `X-Goog-Api-Key` header, Geocoding via the `key` query parameter.

mod details;
mod geocode;
mod search;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;

const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com/v1/";
const DEFAULT_GEOCODE_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/";

/// Error bodies longer than this are cut before they land in an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

pub(crate) const API_KEY_HEADER: &str = "X-Goog-Api-Key";
pub(crate) const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Client for Places text search, place details, and geocoding.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_urls`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    places_base: Url,
    geocode_base: Url,
}

impl std::fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("api_key", &"[redacted]")
            .field("places_base", &self.places_base.as_str())
            .field("geocode_base", &self.geocode_base.as_str())
            .finish_non_exhaustive()
    }
}

impl GooglePlacesClient {
    /// Creates a client pointed at the production Google endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::MissingApiKey`] if `api_key` is blank, or
    /// [`PlacesError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            user_agent,
            DEFAULT_PLACES_BASE_URL,
            DEFAULT_GEOCODE_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::MissingApiKey`] if `api_key` is blank,
    /// [`PlacesError::InvalidBaseUrl`] if either URL does not parse, or
    /// [`PlacesError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_urls(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        places_base: &str,
        geocode_base: &str,
    ) -> Result<Self, PlacesError> {
        if api_key.trim().is_empty() {
            return Err(PlacesError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            places_base: parse_base_url(places_base)?,
            geocode_base: parse_base_url(geocode_base)?,
        })
    }

    /// Appends path segments to the Places base URL. Segments are
    /// percent-encoded, so a place ID can never escape its own segment.
    pub(crate) fn places_url(&self, segments: &[&str]) -> Url {
        extend_path(&self.places_base, segments)
    }

    pub(crate) fn geocode_url(&self, address: &str) -> Url {
        let mut url = extend_path(&self.geocode_base, &["json"]);
        url.query_pairs_mut()
            .append_pair("address", address)
            .append_pair("key", &self.api_key);
        url
    }

    /// Sends the request, maps non-2xx to [`PlacesError::Status`], and
    /// parses the body as `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, PlacesError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlacesError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint.to_string(),
            source: e,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, PlacesError> {
    // Exactly one trailing slash so path pushes land under the base path
    // instead of replacing its last segment.
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(PlacesError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

fn extend_path(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        return body.to_string();
    }
    let cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{cut}…")
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
