pub mod app_config;
pub mod config;
pub mod heuristics;
pub mod leads;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use heuristics::{load_heuristics, parse_heuristics, Heuristics, KeywordGroup};
pub use leads::{
    BoundingBox, EmailSource, EnrichedLead, EnrichmentOutcome, LatLng, RawPlace, ScoredLead,
    ValueTier,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read heuristics file {path}: {source}")]
    HeuristicsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse heuristics file: {0}")]
    HeuristicsFileParse(#[from] serde_yaml::Error),

    #[error("heuristics validation failed: {0}")]
    Validation(String),
}
