//! In-memory provider fakes shared by the pipeline integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use leadgen_core::{BoundingBox, RawPlace};
use leadgen_pipeline::{
    EnrichmentConfig, LocationBiasStrategy, PageFetcher, PipelineConfig, ScrapeError,
};
use leadgen_places::{
    DetailsProvider, Geocoder, PlaceDetails, PlacesError, SearchPage, SearchProvider, SearchRequest,
};

pub fn place(id: &str, name: &str) -> RawPlace {
    RawPlace {
        place_id: id.to_string(),
        name: name.to_string(),
        address: Some(format!("{id} Main St, Miami, FL")),
        rating: Some(4.0),
        review_count: Some(10),
        listed_phone: None,
        listed_website: None,
    }
}

pub fn rated(id: &str, name: &str, rating: f64, reviews: u32) -> RawPlace {
    RawPlace {
        rating: Some(rating),
        review_count: Some(reviews),
        ..place(id, name)
    }
}

/// Zero delays and short timeouts so tests run fast.
pub fn fast_config() -> PipelineConfig {
    PipelineConfig {
        location_bias: LocationBiasStrategy::None,
        page_delay: Duration::ZERO,
        geocode_timeout: Duration::from_millis(50),
        enrichment: EnrichmentConfig {
            batch_delay: Duration::ZERO,
            per_item_delay: Duration::ZERO,
            details_timeout: Duration::from_millis(50),
            scrape_timeout: Duration::from_millis(50),
            ..EnrichmentConfig::default()
        },
        ..PipelineConfig::default()
    }
}

type Responder = dyn Fn(&SearchRequest, usize) -> Result<SearchPage, PlacesError> + Send + Sync;

pub struct FakeSearch {
    responder: Box<Responder>,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl FakeSearch {
    fn with(responder: Box<Responder>) -> Self {
        Self {
            responder,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns `pages` in order, then empty pages.
    pub fn pages(pages: Vec<SearchPage>) -> Self {
        Self::with(Box::new(move |_, index| {
            Ok(pages.get(index).cloned().unwrap_or_default())
        }))
    }

    /// A single page with no continuation token.
    pub fn single(places: Vec<RawPlace>) -> Self {
        Self::pages(vec![SearchPage {
            places,
            next_page_token: None,
        }])
    }

    /// Always returns 20 fresh places and another token.
    pub fn endless() -> Self {
        Self::with(Box::new(|_, index| {
            let places = (0..20)
                .map(|i| place(&format!("p{index}-{i}"), &format!("Business p{index} n{i}")))
                .collect();
            Ok(SearchPage {
                places,
                next_page_token: Some(format!("tok-{}", index + 1)),
            })
        }))
    }

    /// One page of 20 places per query, never a token.
    pub fn per_query() -> Self {
        Self::with(Box::new(|_, index| {
            let places = (0..20)
                .map(|i| place(&format!("q{index}-{i}"), &format!("Shop q{index} n{i}")))
                .collect();
            Ok(SearchPage {
                places,
                next_page_token: None,
            })
        }))
    }

    pub fn failing(status: u16) -> Self {
        Self::with(Box::new(move |_, _| {
            Err(PlacesError::Status {
                status,
                endpoint: "places:searchText".to_string(),
                body: "denied".to_string(),
            })
        }))
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchProvider for FakeSearch {
    async fn text_search(&self, request: &SearchRequest) -> Result<SearchPage, PlacesError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        (self.responder)(request, index)
    }
}

#[derive(Clone)]
pub enum DetailsBehavior {
    Ok(PlaceDetails),
    Fail,
    Hang,
}

pub struct FakeDetails {
    by_id: HashMap<String, DetailsBehavior>,
    fallback: DetailsBehavior,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDetails {
    pub fn always(behavior: DetailsBehavior) -> Self {
        Self {
            by_id: HashMap::new(),
            fallback: behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::always(DetailsBehavior::Ok(PlaceDetails::default()))
    }

    #[must_use]
    pub fn with(mut self, place_id: &str, behavior: DetailsBehavior) -> Self {
        self.by_id.insert(place_id.to_string(), behavior);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DetailsProvider for FakeDetails {
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.calls.lock().unwrap().push(place_id.to_string());
        let behavior = self
            .by_id
            .get(place_id)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());
        match behavior {
            DetailsBehavior::Ok(details) => Ok(details),
            DetailsBehavior::Fail => Err(PlacesError::Api("NOT_FOUND: gone".to_string())),
            DetailsBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(PlaceDetails::default())
            }
        }
    }
}

/// Records how many details lookups overlap. Each call yields once while
/// counted as in flight, so calls joined together are all observed.
#[derive(Default)]
pub struct OverlapDetails {
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub calls: AtomicUsize,
}

impl OverlapDetails {
    pub fn peak(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailsProvider for OverlapDetails {
    async fn place_details(&self, _place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(PlaceDetails::default())
    }
}

#[derive(Default)]
pub struct FakePages {
    html: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakePages {
    #[must_use]
    pub fn with(mut self, url: &str, html: &str) -> Self {
        self.html.insert(url.to_string(), html.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for FakePages {
    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.html.get(url).cloned().ok_or_else(|| ScrapeError::Status {
            status: 404,
            url: url.to_string(),
        })
    }
}

pub enum FakeGeocoder {
    Found(BoundingBox),
    NotFound,
    Fail,
    Hang,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn viewport(&self, _address: &str) -> Result<Option<BoundingBox>, PlacesError> {
        match self {
            FakeGeocoder::Found(bbox) => Ok(Some(*bbox)),
            FakeGeocoder::NotFound => Ok(None),
            FakeGeocoder::Fail => Err(PlacesError::Geocode("REQUEST_DENIED".to_string())),
            FakeGeocoder::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(None)
            }
        }
    }
}
