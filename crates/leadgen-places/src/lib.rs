//! Google Places (New) and Geocoding clients, plus the provider traits the
//! ingestion pipeline is written against.

pub mod client;
pub mod error;
pub mod provider;
pub mod types;

pub use client::GooglePlacesClient;
pub use error::PlacesError;
pub use provider::{
    DetailsProvider, Geocoder, PlaceDetails, SearchFieldMask, SearchPage, SearchProvider,
    SearchRequest, PAGE_SIZE,
};
