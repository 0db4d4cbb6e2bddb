//! Wire types for the Places (New) and Geocoding JSON APIs.
//!
//! Only the fields the pipeline reads are modelled; everything is optional
//! because the field mask decides what the provider sends back.

use leadgen_core::{BoundingBox, LatLng, RawPlace};
use serde::{Deserialize, Serialize};

/// Display name used when the provider omits one.
pub const UNKNOWN_BUSINESS: &str = "Unknown Business";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextBody<'a> {
    pub text_query: &'a str,
    pub max_result_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBias>,
}

#[derive(Debug, Serialize)]
pub struct LocationBias {
    pub rectangle: BoundingBox,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<ApiPlace>,
    pub next_page_token: Option<String>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlace {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub website_uri: Option<String>,
    pub national_phone_number: Option<String>,
}

impl ApiPlace {
    /// Converts to a [`RawPlace`], or `None` when the provider sent no
    /// usable identifier.
    #[must_use]
    pub fn into_raw_place(self) -> Option<RawPlace> {
        let place_id = self.id.filter(|id| !id.trim().is_empty())?;
        let name = self
            .display_name
            .and_then(|d| d.text)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_BUSINESS.to_string());
        Some(RawPlace {
            place_id,
            name,
            address: self.formatted_address.filter(|a| !a.trim().is_empty()),
            rating: self.rating,
            review_count: self.user_rating_count,
            listed_phone: self.national_phone_number,
            listed_website: self.website_uri,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub status: Option<String>,
}

impl ApiErrorBody {
    #[must_use]
    pub fn describe(&self) -> String {
        match (&self.status, &self.message) {
            (Some(status), Some(message)) => format!("{status}: {message}"),
            (None, Some(message)) => message.clone(),
            (Some(status), None) => status.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetailsResponse {
    pub national_phone_number: Option<String>,
    pub website_uri: Option<String>,
    pub business_status: Option<String>,
    pub editorial_summary: Option<LocalizedText>,
    #[serde(default)]
    pub reviews: Vec<ApiReview>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReview {
    pub text: Option<LocalizedText>,
    pub original_text: Option<LocalizedText>,
}

impl ApiReview {
    /// Prefers the untranslated review text.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.original_text
            .as_ref()
            .and_then(|t| t.text.as_deref())
            .or_else(|| self.text.as_ref().and_then(|t| t.text.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub viewport: Viewport,
}

#[derive(Debug, Deserialize)]
pub struct Viewport {
    pub northeast: LatLngLiteral,
    pub southwest: LatLngLiteral,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLngLiteral {
    pub lat: f64,
    pub lng: f64,
}

impl From<&Viewport> for BoundingBox {
    fn from(viewport: &Viewport) -> Self {
        BoundingBox {
            low: LatLng {
                latitude: viewport.southwest.lat,
                longitude: viewport.southwest.lng,
            },
            high: LatLng {
                latitude: viewport.northeast.lat,
                longitude: viewport.northeast.lng,
            },
        }
    }
}
