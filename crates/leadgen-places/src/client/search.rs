use async_trait::async_trait;

use super::{GooglePlacesClient, API_KEY_HEADER, FIELD_MASK_HEADER};
use crate::error::PlacesError;
use crate::provider::{SearchPage, SearchProvider, SearchRequest};
use crate::types::{LocationBias, SearchTextBody, SearchTextResponse};

#[async_trait]
impl SearchProvider for GooglePlacesClient {
    /// `POST places:searchText`.
    ///
    /// A 2xx body carrying an `error` object is logged and returned as an
    /// empty page. Records without a place ID are dropped.
    async fn text_search(&self, request: &SearchRequest) -> Result<SearchPage, PlacesError> {
        let url = self.places_url(&["places:searchText"]);
        let body = SearchTextBody {
            text_query: &request.query,
            max_result_count: request.page_size,
            page_token: request.page_token.as_deref(),
            location_bias: request
                .location_bias
                .map(|rectangle| LocationBias { rectangle }),
        };

        let http = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, request.field_mask.header_value())
            .json(&body);
        let response: SearchTextResponse = self.send_json(http, "places:searchText").await?;

        if let Some(error) = response.error {
            tracing::warn!(
                query = %request.query,
                error = %error.describe(),
                "text search returned an error payload; treating as no results"
            );
            return Ok(SearchPage::default());
        }

        let received = response.places.len();
        let places: Vec<_> = response
            .places
            .into_iter()
            .filter_map(crate::types::ApiPlace::into_raw_place)
            .collect();
        if places.len() < received {
            tracing::warn!(
                query = %request.query,
                dropped = received - places.len(),
                "dropped places without a place ID"
            );
        }

        Ok(SearchPage {
            places,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}
