use thiserror::Error;

/// Errors returned by the geocoding client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("geocoding provider returned HTTP {status} for \"{query}\"")]
    UnexpectedStatus { status: u16, query: String },

    /// The response body could not be deserialized into search results.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl GeocodeError {
    /// HTTP status reported by the provider, when the failure carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GeocodeError::UnexpectedStatus { status, .. } => Some(*status),
            GeocodeError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
