use leadgen_places::PlacesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The search stage failed. Aborts the run.
    #[error("fetching places for \"{query}\" failed: {source}")]
    Fetch {
        query: String,
        #[source]
        source: PlacesError,
    },

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// `true` when the failure is a credential or setup problem.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        match self {
            PipelineError::Fetch { source, .. } => source.is_configuration(),
            PipelineError::InvalidConfig(_) => true,
        }
    }
}

/// Homepage fetch failures. Always absorbed by the email chain.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid website URL \"{0}\"")]
    InvalidUrl(String),

    #[error("page fetch timed out after {0} ms")]
    Timeout(u128),
}
