use serde_json::Value;
use thiserror::Error;

use crate::types::Stage;

/// Errors returned by the Places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Failure constructing the underlying `reqwest::Client`.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network-level failure (connect, TLS, timeout) during a staged call.
    #[error("{stage} request failed: {source}")]
    Request {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream returned a non-success HTTP status. `details` is the
    /// response body, parsed as JSON when possible, raw text otherwise.
    #[error("upstream Places API error at {stage} (HTTP {status})")]
    Upstream {
        stage: Stage,
        status: u16,
        details: Value,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl PlacesError {
    /// The upstream stage this error is attributed to. Faults that are not a
    /// classified upstream failure report as [`Stage::Unknown`].
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            PlacesError::Request { stage, .. } | PlacesError::Upstream { stage, .. } => *stage,
            PlacesError::Http(_) | PlacesError::Deserialize { .. } | PlacesError::InvalidBaseUrl(_) => {
                Stage::Unknown
            }
        }
    }
}
