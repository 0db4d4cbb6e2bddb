//! Duplicate and corporate-chain removal.

use std::collections::HashSet;

use leadgen_core::{Heuristics, RawPlace};

/// Lowercases, keeps only alphanumerics (any script) and whitespace,
/// collapses runs of whitespace to a single space, and trims.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Single pass, order-preserving, first occurrence wins.
///
/// A place is rejected when its ID or normalized name was already kept, or
/// when its lowercased name contains a corporate indicator. Rejected places
/// do not claim their ID or name. A name that normalizes to nothing (only
/// punctuation) is never compared.
#[must_use]
pub fn dedupe(places: Vec<RawPlace>, heuristics: &Heuristics) -> Vec<RawPlace> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let received = places.len();

    let kept: Vec<RawPlace> = places
        .into_iter()
        .filter(|place| {
            if seen_ids.contains(&place.place_id) {
                return false;
            }

            let normalized = normalize_name(&place.name);
            if !normalized.is_empty() && seen_names.contains(&normalized) {
                tracing::debug!(name = %place.name, "dropped near-duplicate name");
                return false;
            }

            if let Some(indicator) = heuristics.corporate_match(&place.name.to_lowercase()) {
                tracing::debug!(name = %place.name, indicator, "filtered corporation");
                return false;
            }

            seen_ids.insert(place.place_id.clone());
            if !normalized.is_empty() {
                seen_names.insert(normalized);
            }
            true
        })
        .collect();

    tracing::debug!(received, kept = kept.len(), "dedupe complete");
    kept
}
