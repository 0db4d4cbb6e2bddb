use async_trait::async_trait;
use leadgen_core::BoundingBox;

use super::GooglePlacesClient;
use crate::error::PlacesError;
use crate::provider::Geocoder;
use crate::types::GeocodeResponse;

#[async_trait]
impl Geocoder for GooglePlacesClient {
    async fn viewport(&self, address: &str) -> Result<Option<BoundingBox>, PlacesError> {
        let url = self.geocode_url(address);
        let response: GeocodeResponse = self.send_json(self.client.get(url), "geocode/json").await?;

        match response.status.as_str() {
            "OK" => Ok(response
                .results
                .first()
                .map(|r| BoundingBox::from(&r.geometry.viewport))),
            "ZERO_RESULTS" => Ok(None),
            other => {
                let detail = response
                    .error_message
                    .map_or_else(|| other.to_string(), |m| format!("{other}: {m}"));
                Err(PlacesError::Geocode(detail))
            }
        }
    }
}
