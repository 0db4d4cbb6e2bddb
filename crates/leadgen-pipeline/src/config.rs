//! Knobs for one pipeline instance.
//!
//! The several historical service variants differ only in field mask,
//! location bias, and enrichment strategy, so those are the fields here.

use std::time::Duration;

use leadgen_core::{AppConfig, BoundingBox, Heuristics};
use leadgen_places::SearchFieldMask;

use crate::enrich::email::EmailStrategy;
use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationBiasStrategy {
    /// No `locationBias` in the request.
    None,
    /// Always bias towards this rectangle.
    Fixed(BoundingBox),
    /// Geocode the city and use its viewport, falling back to the whole world.
    #[default]
    Geocoded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStyle {
    /// One `"{category} {city}"` query.
    #[default]
    Primary,
    /// Per-category synonym terms, fetched in order until the pool is full.
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentMode {
    /// Fixed-size concurrent batches with a pause between batches.
    #[default]
    Batched,
    /// One lead at a time with a pause between leads.
    Sequential,
    /// Every lead passes through as `skipped`.
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    pub mode: EnrichmentMode,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub per_item_delay: Duration,
    pub details_timeout: Duration,
    pub scrape_timeout: Duration,
    /// Enrich at most this many leads from the top. `None` enriches all.
    pub limit: Option<usize>,
    pub email_strategies: Vec<EmailStrategy>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            mode: EnrichmentMode::Batched,
            batch_size: 5,
            batch_delay: Duration::from_millis(200),
            per_item_delay: Duration::from_millis(100),
            details_timeout: Duration::from_millis(3000),
            scrape_timeout: Duration::from_millis(5000),
            limit: None,
            email_strategies: EmailStrategy::DEFAULT_ORDER.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub field_mask: SearchFieldMask,
    pub location_bias: LocationBiasStrategy,
    pub query_style: QueryStyle,
    /// Pause between search requests, skipped after the last one.
    pub page_delay: Duration,
    pub geocode_timeout: Duration,
    pub enrichment: EnrichmentConfig,
    pub heuristics: Heuristics,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            field_mask: SearchFieldMask::WithContact,
            location_bias: LocationBiasStrategy::Geocoded,
            query_style: QueryStyle::Primary,
            page_delay: Duration::from_millis(100),
            geocode_timeout: Duration::from_millis(1000),
            enrichment: EnrichmentConfig::default(),
            heuristics: Heuristics::default(),
        }
    }
}

impl PipelineConfig {
    /// Builds a config from the environment-derived settings. Strategy
    /// choices keep their defaults; callers override them afterwards.
    #[must_use]
    pub fn from_app_config(app: &AppConfig, heuristics: Heuristics) -> Self {
        Self {
            page_delay: Duration::from_millis(app.page_delay_ms),
            geocode_timeout: Duration::from_millis(app.geocode_timeout_ms),
            enrichment: EnrichmentConfig {
                batch_size: app.enrich_batch_size,
                batch_delay: Duration::from_millis(app.enrich_batch_delay_ms),
                details_timeout: Duration::from_millis(app.details_timeout_ms),
                scrape_timeout: Duration::from_millis(app.scrape_timeout_ms),
                ..EnrichmentConfig::default()
            },
            heuristics,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] for a zero batch size, a zero
    /// details timeout, or an empty email strategy list.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.enrichment.batch_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "enrichment batch size must be at least 1".to_string(),
            ));
        }
        if self.enrichment.details_timeout.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "details timeout must be greater than zero".to_string(),
            ));
        }
        if self.enrichment.email_strategies.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one email strategy is required".to_string(),
            ));
        }
        Ok(())
    }
}
