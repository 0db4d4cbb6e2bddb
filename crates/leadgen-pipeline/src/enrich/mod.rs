//! Best-effort contact enrichment for the top of the ranked list.
//!
//! A lead is never dropped here. Details failures produce a `failed` lead
//! with null contact fields; leads past the limit pass through as `skipped`.

pub mod email;
pub mod scrape;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use leadgen_core::{EmailSource, EnrichedLead, EnrichmentOutcome, ScoredLead};
use leadgen_places::{DetailsProvider, PlaceDetails};

use crate::config::{EnrichmentConfig, EnrichmentMode};
use crate::error::ScrapeError;
use email::{email_from_free_text, guess_from_website, EmailLookup, EmailStrategy};
use scrape::{extract_email_from_html, PageFetcher};

pub struct EnrichmentEngine {
    details: Arc<dyn DetailsProvider>,
    pages: Arc<dyn PageFetcher>,
    config: EnrichmentConfig,
}

impl EnrichmentEngine {
    #[must_use]
    pub fn new(
        details: Arc<dyn DetailsProvider>,
        pages: Arc<dyn PageFetcher>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            details,
            pages,
            config,
        }
    }

    /// Enriches the first `limit` leads and passes the rest through.
    /// Output order and length always match the input.
    pub async fn enrich(&self, mut leads: Vec<ScoredLead>, limit: usize) -> Vec<EnrichedLead> {
        let limit = match self.config.mode {
            EnrichmentMode::Disabled => 0,
            _ => limit.min(leads.len()),
        };
        let passthrough = leads.split_off(limit);

        let mut out = match self.config.mode {
            EnrichmentMode::Batched => self.enrich_batched(leads).await,
            EnrichmentMode::Sequential => self.enrich_sequential(leads).await,
            EnrichmentMode::Disabled => Vec::new(),
        };
        out.extend(passthrough.into_iter().map(EnrichedLead::skipped));

        let failed = out
            .iter()
            .filter(|l| l.enrichment == EnrichmentOutcome::Failed)
            .count();
        let with_email = out.iter().filter(|l| l.email.is_some()).count();
        tracing::info!(
            total = out.len(),
            attempted = limit,
            failed,
            with_email,
            "enrichment complete"
        );
        out
    }

    async fn enrich_batched(&self, leads: Vec<ScoredLead>) -> Vec<EnrichedLead> {
        let batch_size = self.config.batch_size.max(1);
        let batch_count = leads.len().div_ceil(batch_size);
        let mut out = Vec::with_capacity(leads.len());
        let mut remaining = leads.into_iter();

        for batch_index in 0..batch_count {
            if batch_index > 0 {
                pause(self.config.batch_delay).await;
            }
            let batch: Vec<ScoredLead> = remaining.by_ref().take(batch_size).collect();
            tracing::debug!(
                batch = batch_index + 1,
                of = batch_count,
                size = batch.len(),
                "enriching batch"
            );
            out.extend(join_all(batch.into_iter().map(|lead| self.enrich_one(lead))).await);
        }
        out
    }

    async fn enrich_sequential(&self, leads: Vec<ScoredLead>) -> Vec<EnrichedLead> {
        let mut out = Vec::with_capacity(leads.len());
        for (index, lead) in leads.into_iter().enumerate() {
            if index > 0 {
                pause(self.config.per_item_delay).await;
            }
            out.push(self.enrich_one(lead).await);
        }
        out
    }

    /// Details lookup under the hard timeout, then the email chain.
    pub async fn enrich_one(&self, lead: ScoredLead) -> EnrichedLead {
        let place_id = lead.place.place_id.clone();
        let lookup = tokio::time::timeout(
            self.config.details_timeout,
            self.details.place_details(&place_id),
        )
        .await;

        let details = match lookup {
            Ok(Ok(details)) => details,
            Ok(Err(e)) => {
                tracing::warn!(place_id = %place_id, error = %e, "details lookup failed");
                return EnrichedLead::failed(lead);
            }
            Err(_) => {
                tracing::warn!(
                    place_id = %place_id,
                    timeout_ms = self.config.details_timeout.as_millis(),
                    "details lookup timed out"
                );
                return EnrichedLead::failed(lead);
            }
        };

        let phone = details
            .phone
            .clone()
            .or_else(|| lead.place.listed_phone.clone());
        let website = details
            .website
            .clone()
            .or_else(|| lead.place.listed_website.clone());
        let found = self.resolve_email(&details, website.as_deref()).await;
        let (email, email_source) = match found {
            Some((email, source)) => (Some(email), Some(source)),
            None => (None, None),
        };

        EnrichedLead {
            lead,
            phone,
            website,
            email,
            email_source,
            business_status: details.business_status,
            enrichment: EnrichmentOutcome::Enriched,
        }
    }

    async fn resolve_email(
        &self,
        details: &PlaceDetails,
        website: Option<&str>,
    ) -> Option<(String, EmailSource)> {
        for strategy in &self.config.email_strategies {
            let lookup = match (strategy, website) {
                (EmailStrategy::ProviderText, _) => email_from_free_text(details.free_text()),
                (EmailStrategy::WebsiteScrape, Some(site)) => self.scrape_email(site).await,
                (EmailStrategy::DomainGuess, Some(site)) => guess_from_website(site),
                (_, None) => EmailLookup::NotFound,
            };
            if let EmailLookup::Found(email) = lookup {
                return Some((email, strategy.source()));
            }
        }
        None
    }

    /// Failures and timeouts are logged and reported as not-found.
    async fn scrape_email(&self, website: &str) -> EmailLookup {
        let fetched =
            match tokio::time::timeout(self.config.scrape_timeout, self.pages.fetch_html(website))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ScrapeError::Timeout(self.config.scrape_timeout.as_millis())),
            };
        match fetched {
            Ok(html) => extract_email_from_html(&html).into(),
            Err(e) => {
                tracing::debug!(website, error = %e, "homepage scrape failed");
                EmailLookup::NotFound
            }
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
