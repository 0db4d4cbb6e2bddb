//! Provider seams the pipeline depends on.
//!
//! `GooglePlacesClient` implements all three traits. Tests substitute
//! in-memory fakes so orchestration can be exercised without a network.

use async_trait::async_trait;
use leadgen_core::{BoundingBox, RawPlace};

use crate::error::PlacesError;

/// Maximum results per text-search request accepted by the provider.
pub const PAGE_SIZE: u32 = 20;

/// Which fields the text-search call asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFieldMask {
    /// Identity, address, and rating fields only.
    Basic,
    /// Also requests phone and website so leads that are never enriched
    /// still carry contact data.
    #[default]
    WithContact,
}

impl SearchFieldMask {
    #[must_use]
    pub fn header_value(self) -> &'static str {
        match self {
            SearchFieldMask::Basic => {
                "places.id,places.displayName,places.formattedAddress,places.rating,\
                 places.userRatingCount,nextPageToken"
            }
            SearchFieldMask::WithContact => {
                "places.id,places.displayName,places.formattedAddress,places.rating,\
                 places.userRatingCount,places.websiteUri,places.nationalPhoneNumber,\
                 nextPageToken"
            }
        }
    }
}

/// One text-search page request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub page_token: Option<String>,
    pub page_size: u32,
    pub location_bias: Option<BoundingBox>,
    pub field_mask: SearchFieldMask,
}

impl SearchRequest {
    #[must_use]
    pub fn first_page(
        query: &str,
        location_bias: Option<BoundingBox>,
        field_mask: SearchFieldMask,
    ) -> Self {
        Self {
            query: query.to_string(),
            page_token: None,
            page_size: PAGE_SIZE,
            location_bias,
            field_mask,
        }
    }

    /// The same request pointed at the page behind `token`.
    #[must_use]
    pub fn next_page(&self, token: &str) -> Self {
        Self {
            page_token: Some(token.to_string()),
            ..self.clone()
        }
    }
}

/// One page of search results plus the continuation token, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub places: Vec<RawPlace>,
    pub next_page_token: Option<String>,
}

/// Per-place details used for enrichment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceDetails {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub business_status: Option<String>,
    pub editorial_summary: Option<String>,
    pub review_texts: Vec<String>,
}

impl PlaceDetails {
    /// Free-text fields that may mention an email address: the editorial
    /// summary first, then at most five review texts.
    pub fn free_text(&self) -> impl Iterator<Item = &str> {
        self.editorial_summary
            .as_deref()
            .into_iter()
            .chain(self.review_texts.iter().take(5).map(String::as_str))
    }
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch one page of text-search results.
    ///
    /// A provider-level "no results" is an empty page, not an error.
    async fn text_search(&self, request: &SearchRequest) -> Result<SearchPage, PlacesError>;
}

#[async_trait]
pub trait DetailsProvider: Send + Sync {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve an address to its viewport. `Ok(None)` when nothing matched.
    async fn viewport(&self, address: &str) -> Result<Option<BoundingBox>, PlacesError>;
}
