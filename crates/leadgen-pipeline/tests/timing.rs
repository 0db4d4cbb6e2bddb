//! Pacing and batching under a paused clock. Elapsed times are virtual.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{place, FakeDetails, FakePages, FakeSearch, OverlapDetails};
use leadgen_core::RawPlace;
use leadgen_pipeline::{EnrichmentMode, LeadPipeline, LocationBiasStrategy, PipelineConfig};
use leadgen_places::SearchPage;
use tokio::time::Instant;

/// Production delays, no geocoding.
fn paced_config() -> PipelineConfig {
    PipelineConfig {
        location_bias: LocationBiasStrategy::None,
        ..PipelineConfig::default()
    }
}

fn shops(prefix: &str, count: usize) -> Vec<RawPlace> {
    (0..count)
        .map(|i| place(&format!("{prefix}{i}"), &format!("Shop {prefix} n{i}")))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn twelve_leads_enrich_in_three_batches_of_at_most_five() {
    let search = Arc::new(FakeSearch::single(shops("b", 12)));
    let details = Arc::new(OverlapDetails::default());
    let pipeline = LeadPipeline::new(
        search.clone(),
        details.clone(),
        Arc::new(FakePages::default()),
        paced_config(),
    )
    .expect("valid config");

    let started = Instant::now();
    let leads = pipeline.run("Miami, FL", "Plumbing", 12).await.unwrap();

    assert_eq!(leads.len(), 12);
    assert_eq!(search.request_count(), 1);
    assert_eq!(details.call_count(), 12);
    assert_eq!(details.peak(), 5);
    // Batches of 5, 5, 2 with a 200 ms pause between them and none after.
    assert_eq!(started.elapsed(), Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn ten_leads_pause_only_between_two_batches() {
    let details = Arc::new(OverlapDetails::default());
    let pipeline = LeadPipeline::new(
        Arc::new(FakeSearch::single(shops("t", 10))),
        details.clone(),
        Arc::new(FakePages::default()),
        paced_config(),
    )
    .expect("valid config");

    let started = Instant::now();
    pipeline.run("Miami, FL", "Plumbing", 10).await.unwrap();

    assert_eq!(details.peak(), 5);
    assert_eq!(started.elapsed(), Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn two_pages_wait_one_page_delay() {
    let search = Arc::new(FakeSearch::pages(vec![
        SearchPage {
            places: shops("a", 20),
            next_page_token: Some("tok-1".to_string()),
        },
        SearchPage {
            places: shops("z", 5),
            next_page_token: None,
        },
    ]));
    let mut config = paced_config();
    config.enrichment.mode = EnrichmentMode::Disabled;
    let pipeline = LeadPipeline::new(
        search.clone(),
        Arc::new(FakeDetails::empty()),
        Arc::new(FakePages::default()),
        config,
    )
    .expect("valid config");

    let started = Instant::now();
    let leads = pipeline.run("Miami, FL", "Plumbing", 40).await.unwrap();

    assert_eq!(leads.len(), 25);
    assert_eq!(search.request_count(), 2);
    assert_eq!(started.elapsed(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn sequential_enrichment_runs_one_lookup_at_a_time() {
    let details = Arc::new(OverlapDetails::default());
    let mut config = paced_config();
    config.enrichment.mode = EnrichmentMode::Sequential;
    let pipeline = LeadPipeline::new(
        Arc::new(FakeSearch::single(shops("s", 3))),
        details.clone(),
        Arc::new(FakePages::default()),
        config,
    )
    .expect("valid config");

    let started = Instant::now();
    pipeline.run("Miami, FL", "Plumbing", 3).await.unwrap();

    assert_eq!(details.call_count(), 3);
    assert_eq!(details.peak(), 1);
    // 100 ms between each of the three lookups.
    assert_eq!(started.elapsed(), Duration::from_millis(200));
}
