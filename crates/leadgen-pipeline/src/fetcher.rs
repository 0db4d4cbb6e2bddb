//! Paginated text search with a request ceiling.

use std::sync::Arc;
use std::time::Duration;

use leadgen_core::{BoundingBox, RawPlace};
use leadgen_places::{PlacesError, SearchFieldMask, SearchProvider, SearchRequest, PAGE_SIZE};

/// Hard ceiling on search requests per query (200 raw results).
pub const MAX_REQUESTS_PER_QUERY: usize = 10;

/// Number of search requests allowed for `max_leads`: `ceil(max_leads / 20)`
/// clamped to `1..=10`.
#[must_use]
pub fn max_requests(max_leads: usize) -> usize {
    max_leads
        .div_ceil(PAGE_SIZE as usize)
        .clamp(1, MAX_REQUESTS_PER_QUERY)
}

pub struct PlacesFetcher {
    provider: Arc<dyn SearchProvider>,
    field_mask: SearchFieldMask,
    page_delay: Duration,
}

impl PlacesFetcher {
    #[must_use]
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        field_mask: SearchFieldMask,
        page_delay: Duration,
    ) -> Self {
        Self {
            provider,
            field_mask,
            page_delay,
        }
    }

    /// Follows continuation tokens until there is none, the request ceiling
    /// is hit, or at least `max_leads` raw places have been collected.
    ///
    /// Returns an empty list without calling the provider when `max_leads`
    /// is zero.
    ///
    /// # Errors
    ///
    /// Propagates the first [`PlacesError`] from the provider. Pages fetched
    /// before the failure are discarded.
    pub async fn fetch(
        &self,
        query: &str,
        max_leads: usize,
        location_bias: Option<BoundingBox>,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        if max_leads == 0 {
            return Ok(Vec::new());
        }

        let ceiling = max_requests(max_leads);
        let mut request = SearchRequest::first_page(query, location_bias, self.field_mask);
        let mut places: Vec<RawPlace> = Vec::new();
        let mut request_count = 0usize;

        loop {
            let page = self.provider.text_search(&request).await?;
            request_count += 1;
            tracing::debug!(
                query,
                page = request_count,
                received = page.places.len(),
                "search page fetched"
            );
            places.extend(page.places);

            let Some(token) = page.next_page_token else {
                break;
            };
            if request_count >= ceiling || places.len() >= max_leads {
                break;
            }

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
            request = request.next_page(&token);
        }

        tracing::info!(
            query,
            raw = places.len(),
            requests = request_count,
            "pagination complete"
        );
        Ok(places)
    }
}
