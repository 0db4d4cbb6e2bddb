//! Value scoring: rating, review volume, name quality, and address quality
//! combined into a 0–100 score.

use std::sync::LazyLock;

use leadgen_core::{Heuristics, RawPlace, ScoredLead, ValueTier};
use regex::Regex;

static SUITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(suite|ste|unit)\b").expect("valid suite regex"));
static PO_BOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bp\.?\s*o\.?\s*box\b").expect("valid po box regex"));

const RATING_WEIGHT: f64 = 50.0;
const NAME_POINTS_CAP: u32 = 20;
const SUITE_POINTS: u32 = 5;
const STREET_ADDRESS_POINTS: u32 = 5;

/// `(rating / 5) * 50`; 0 when absent. Out-of-range ratings are clamped.
#[must_use]
pub fn rating_points(rating: Option<f64>) -> f64 {
    match rating {
        Some(r) if r.is_finite() => (r.clamp(0.0, 5.0) / 5.0) * RATING_WEIGHT,
        _ => 0.0,
    }
}

#[must_use]
pub fn review_points(review_count: Option<u32>) -> u32 {
    match review_count.unwrap_or(0) {
        500.. => 30,
        100..=499 => 25,
        50..=99 => 20,
        20..=49 => 15,
        10..=19 => 10,
        1..=9 => 5,
        0 => 0,
    }
}

/// Sum of every matching keyword group, capped at 20.
#[must_use]
pub fn name_points(name: &str, heuristics: &Heuristics) -> u32 {
    let lowered = name.to_lowercase();
    let total: u32 = heuristics
        .keyword_groups
        .iter()
        .filter(|group| group.matches(&lowered))
        .map(|group| u32::from(group.points))
        .sum();
    total.min(NAME_POINTS_CAP)
}

/// +5 for a suite/unit marker, +5 for any address that is not a PO box.
/// The two checks are independent.
#[must_use]
pub fn address_points(address: Option<&str>) -> u32 {
    let Some(address) = address.filter(|a| !a.trim().is_empty()) else {
        return 0;
    };
    let mut points = 0;
    if SUITE_RE.is_match(address) {
        points += SUITE_POINTS;
    }
    if !PO_BOX_RE.is_match(address) {
        points += STREET_ADDRESS_POINTS;
    }
    points
}

/// Rounded, clamped 0–100 value score for one place.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn value_score(place: &RawPlace, heuristics: &Heuristics) -> u8 {
    let discrete = review_points(place.review_count)
        + name_points(&place.name, heuristics)
        + address_points(place.address.as_deref());
    let total = rating_points(place.rating) + f64::from(discrete);
    // Clamped to 0..=100 first, so the cast cannot truncate.
    total.round().clamp(0.0, 100.0) as u8
}

/// Scores every place and sorts by descending score. The sort is stable, so
/// ties keep their input order.
#[must_use]
pub fn score_places(places: Vec<RawPlace>, heuristics: &Heuristics) -> Vec<ScoredLead> {
    let mut scored: Vec<ScoredLead> = places
        .into_iter()
        .map(|place| {
            let value_score = value_score(&place, heuristics);
            ScoredLead {
                place,
                value_score,
                value_tier: ValueTier::from_score(value_score),
            }
        })
        .collect();
    scored.sort_by(|a, b| b.value_score.cmp(&a.value_score));
    scored
}
