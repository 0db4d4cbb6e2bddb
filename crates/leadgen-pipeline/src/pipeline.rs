//! Orchestrates one (city, category) run end to end.

use std::sync::Arc;

use leadgen_core::{BoundingBox, EnrichedLead, RawPlace};
use leadgen_places::{DetailsProvider, Geocoder, SearchProvider};

use crate::config::{LocationBiasStrategy, PipelineConfig, QueryStyle};
use crate::dedupe::dedupe;
use crate::enrich::scrape::PageFetcher;
use crate::enrich::EnrichmentEngine;
use crate::error::PipelineError;
use crate::fetcher::PlacesFetcher;
use crate::query::{expanded_queries, primary_query};
use crate::scorer::score_places;

/// Composes fetch, dedupe, scoring, truncation, and enrichment.
///
/// Providers are passed in as trait objects so the pipeline can run against
/// Google in production and against fakes in tests.
pub struct LeadPipeline {
    fetcher: PlacesFetcher,
    enricher: EnrichmentEngine,
    geocoder: Option<Arc<dyn Geocoder>>,
    config: PipelineConfig,
}

impl LeadPipeline {
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if `config` fails validation.
    pub fn new(
        search: Arc<dyn SearchProvider>,
        details: Arc<dyn DetailsProvider>,
        pages: Arc<dyn PageFetcher>,
        config: PipelineConfig,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            fetcher: PlacesFetcher::new(search, config.field_mask, config.page_delay),
            enricher: EnrichmentEngine::new(details, pages, config.enrichment.clone()),
            geocoder: None,
            config,
        })
    }

    /// Geocoder used by [`LocationBiasStrategy::Geocoded`]. Without one, that
    /// strategy falls back to the whole-world rectangle.
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the full pipeline and returns at most `max_leads` leads sorted by
    /// descending value score.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] if any search request fails. Later
    /// stages never fail the run.
    pub async fn run(
        &self,
        city: &str,
        category: &str,
        max_leads: usize,
    ) -> Result<Vec<EnrichedLead>, PipelineError> {
        if max_leads == 0 {
            return Ok(Vec::new());
        }

        let queries = match self.config.query_style {
            QueryStyle::Primary => vec![primary_query(city, category)],
            QueryStyle::Expanded => expanded_queries(city, category),
        };
        let location_bias = self.resolve_location_bias(city).await;

        let raw = self.fetch_all(&queries, max_leads, location_bias).await?;
        tracing::info!(city, category, raw = raw.len(), "fetched raw places");
        if raw.is_empty() {
            return Ok(Vec::new());
        }

        let unique = dedupe(raw, &self.config.heuristics);
        let mut ranked = score_places(unique, &self.config.heuristics);
        ranked.truncate(max_leads);
        tracing::info!(city, category, ranked = ranked.len(), "ranked leads");

        let limit = self.config.enrichment.limit.unwrap_or(ranked.len());
        Ok(self.enricher.enrich(ranked, limit).await)
    }

    async fn fetch_all(
        &self,
        queries: &[String],
        max_leads: usize,
        location_bias: Option<BoundingBox>,
    ) -> Result<Vec<RawPlace>, PipelineError> {
        let mut pool: Vec<RawPlace> = Vec::new();
        for (index, query) in queries.iter().enumerate() {
            if pool.len() >= max_leads {
                break;
            }
            if index > 0 && !self.config.page_delay.is_zero() {
                tokio::time::sleep(self.config.page_delay).await;
            }
            let places = self
                .fetcher
                .fetch(query, max_leads, location_bias)
                .await
                .map_err(|source| PipelineError::Fetch {
                    query: query.clone(),
                    source,
                })?;
            pool.extend(places);
        }
        Ok(pool)
    }

    async fn resolve_location_bias(&self, city: &str) -> Option<BoundingBox> {
        match self.config.location_bias {
            LocationBiasStrategy::None => None,
            LocationBiasStrategy::Fixed(rectangle) => Some(rectangle),
            LocationBiasStrategy::Geocoded => Some(self.geocode_city(city).await),
        }
    }

    async fn geocode_city(&self, city: &str) -> BoundingBox {
        let Some(geocoder) = &self.geocoder else {
            tracing::warn!(city, "no geocoder configured; using world location bias");
            return BoundingBox::WORLD;
        };

        match tokio::time::timeout(self.config.geocode_timeout, geocoder.viewport(city)).await {
            Ok(Ok(Some(viewport))) => {
                tracing::debug!(city, ?viewport, "geocoded city");
                viewport
            }
            Ok(Ok(None)) => {
                tracing::warn!(city, "city not found by geocoder; using world location bias");
                BoundingBox::WORLD
            }
            Ok(Err(e)) => {
                tracing::warn!(city, error = %e, "geocoding failed; using world location bias");
                BoundingBox::WORLD
            }
            Err(_) => {
                tracing::warn!(
                    city,
                    timeout_ms = self.config.geocode_timeout.as_millis(),
                    "geocoding timed out; using world location bias"
                );
                BoundingBox::WORLD
            }
        }
    }
}
