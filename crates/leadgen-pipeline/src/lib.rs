//! The lead ingestion pipeline: query building, paginated fetch,
//! de-duplication, value scoring, and best-effort contact enrichment.

pub mod config;
pub mod dedupe;
pub mod enrich;
pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod query;
pub mod scorer;

pub use config::{
    EnrichmentConfig, EnrichmentMode, LocationBiasStrategy, PipelineConfig, QueryStyle,
};
pub use dedupe::{dedupe, normalize_name};
pub use enrich::email::{EmailLookup, EmailStrategy};
pub use enrich::scrape::{HttpPageFetcher, PageFetcher};
pub use enrich::EnrichmentEngine;
pub use error::{PipelineError, ScrapeError};
pub use fetcher::{max_requests, PlacesFetcher};
pub use pipeline::LeadPipeline;
pub use query::{expanded_queries, primary_query};
pub use scorer::{score_places, value_score};
