use async_trait::async_trait;

use super::{GooglePlacesClient, API_KEY_HEADER, FIELD_MASK_HEADER};
use crate::error::PlacesError;
use crate::provider::{DetailsProvider, PlaceDetails};
use crate::types::PlaceDetailsResponse;

const DETAILS_FIELD_MASK: &str =
    "nationalPhoneNumber,websiteUri,editorialSummary,businessStatus,reviews";

#[async_trait]
impl DetailsProvider for GooglePlacesClient {
    /// `GET places/{id}`. An `error` object in a 2xx body becomes
    /// [`PlacesError::Api`].
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.places_url(&["places", place_id]);
        let http = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, DETAILS_FIELD_MASK);
        let response: PlaceDetailsResponse = self.send_json(http, "places/{id}").await?;

        if let Some(error) = response.error {
            return Err(PlacesError::Api(error.describe()));
        }

        let review_texts = response
            .reviews
            .iter()
            .filter_map(|r| r.body())
            .filter(|t| !t.trim().is_empty())
            .map(str::to_owned)
            .collect();

        Ok(PlaceDetails {
            phone: response.national_phone_number,
            website: response.website_uri,
            business_status: response.business_status,
            editorial_summary: response.editorial_summary.and_then(|s| s.text),
            review_texts,
        })
    }
}
