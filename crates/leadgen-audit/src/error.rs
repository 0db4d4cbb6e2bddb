use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {endpoint}: {body}")]
    Status {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid website URL \"{0}\"")]
    InvalidUrl(String),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("PageSpeed report has no score for category '{0}'")]
    MissingCategory(String),

    #[error("no audit component could be measured for {url}")]
    NothingMeasured { url: String },
}
