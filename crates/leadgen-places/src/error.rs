use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("missing Google Places API key")]
    MissingApiKey,

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Places API returned HTTP {status} from {endpoint}: {body}")]
    Status {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("Places API error: {0}")]
    Api(String),

    #[error("geocoding failed with status {0}")]
    Geocode(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PlacesError {
    /// `true` for credential and setup problems that no retry can fix.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        match self {
            PlacesError::MissingApiKey | PlacesError::InvalidBaseUrl { .. } => true,
            PlacesError::Status { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}
