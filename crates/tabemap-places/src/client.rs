//! HTTP client for the Google Places API (v1).
//!
//! Wraps `reqwest` with Places-specific request construction: API key and
//! field-mask headers, location-bias payloads, and classification of non-2xx
//! responses into staged [`PlacesError::Upstream`] values carrying the
//! upstream status and body verbatim. Each method performs exactly one
//! outbound request — no retries, no caching.

use std::time::Duration;

use reqwest::{Client, Url};

use tabemap_core::BiasRegion;

use crate::error::PlacesError;
use crate::fields;
use crate::types::{Candidate, PlaceDetails, SearchRequest, SearchResponse, Stage};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1";

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

/// Client for the Places v1 REST API.
///
/// Manages the HTTP client, API key, and base URL. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
#[derive(Debug)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// `timeout_secs` is the per-request timeout; an expired call surfaces as
    /// a staged [`PlacesError::Request`] for the operation that timed out.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tabemap/0.1 (places-resolver)")
            .build()?;

        // Normalise: a single trailing slash keeps joined paths rooted under
        // the versioned base rather than replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| PlacesError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs a text search with the given field mask.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Request`] on network failure or timeout.
    /// - [`PlacesError::Upstream`] on a non-2xx upstream status, carrying the
    ///   status and the response body.
    /// - [`PlacesError::Deserialize`] if the body is not a search response.
    pub async fn search_text(
        &self,
        request: &SearchRequest,
        field_mask: &str,
    ) -> Result<SearchResponse, PlacesError> {
        let url = self.search_url()?;
        tracing::debug!(query = %request.text_query, field_mask, "places text search");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, field_mask)
            .json(request)
            .send()
            .await
            .map_err(|e| PlacesError::Request {
                stage: Stage::TextSearch,
                source: e,
            })?;

        let body = Self::read_classified(response, Stage::TextSearch).await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: "places:searchText".to_string(),
            source: e,
        })
    }

    /// Searches for the single best candidate for a free-text name, biased to
    /// the given region and masked down to the place id.
    ///
    /// `Ok(None)` means the upstream answered normally but had no match —
    /// absence of a candidate is not an error.
    ///
    /// # Errors
    ///
    /// Same contract as [`PlacesClient::search_text`].
    pub async fn find_candidate(
        &self,
        query: &str,
        language_code: &str,
        region: BiasRegion,
    ) -> Result<Option<Candidate>, PlacesError> {
        let request = SearchRequest {
            text_query: query.to_owned(),
            language_code: language_code.to_owned(),
            page_size: Some(1),
            page_token: None,
            location_bias: Some(region.bias().into()),
        };
        let response = self.search_text(&request, fields::SEARCH_ID_ONLY).await?;
        Ok(response.places.into_iter().next())
    }

    /// Fetches the detail record for a place id with an explicit field mask.
    ///
    /// Callers are responsible for sanitizing the mask first (see
    /// [`crate::fields::sanitize_details_mask`]); this method sends exactly
    /// what it is given.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Request`] on network failure or timeout.
    /// - [`PlacesError::Upstream`] on a non-2xx upstream status.
    /// - [`PlacesError::Deserialize`] if the body is not a detail record.
    pub async fn place_details(
        &self,
        place_id: &str,
        language_code: &str,
        field_mask: &str,
    ) -> Result<PlaceDetails, PlacesError> {
        let url = self.details_url(place_id, language_code)?;
        tracing::debug!(place_id, field_mask, "places detail fetch");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, field_mask)
            .send()
            .await
            .map_err(|e| PlacesError::Request {
                stage: Stage::PlaceDetails,
                source: e,
            })?;

        let body = Self::read_classified(response, Stage::PlaceDetails).await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: format!("places/{place_id}"),
            source: e,
        })
    }

    fn search_url(&self) -> Result<Url, PlacesError> {
        // Built by string concatenation: `Url::join` would treat the colon in
        // "places:searchText" as a scheme separator.
        Url::parse(&format!("{}places:searchText", self.base_url))
            .map_err(|_| PlacesError::InvalidBaseUrl(self.base_url.to_string()))
    }

    /// Builds `{base}/places/{id}?languageCode=…` with the place id
    /// percent-encoded as a path segment.
    fn details_url(&self, place_id: &str, language_code: &str) -> Result<Url, PlacesError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PlacesError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("places")
            .push(place_id);
        url.query_pairs_mut()
            .append_pair("languageCode", language_code);
        Ok(url)
    }

    /// Reads the response body and asserts a 2xx status. Non-success statuses
    /// become [`PlacesError::Upstream`] with the body parsed as JSON when
    /// possible, raw text otherwise.
    async fn read_classified(
        response: reqwest::Response,
        stage: Stage,
    ) -> Result<String, PlacesError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlacesError::Request { stage, source: e })?;

        if status.is_success() {
            return Ok(body);
        }

        let details = serde_json::from_str::<serde_json::Value>(&body)
            .unwrap_or(serde_json::Value::String(body));
        Err(PlacesError::Upstream {
            stage,
            status: status.as_u16(),
            details,
        })
    }
}
