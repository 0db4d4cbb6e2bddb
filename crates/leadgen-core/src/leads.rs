//! Lead records as they move through the ingestion pipeline.
//!
//! `RawPlace` → `ScoredLead` → `EnrichedLead` is strictly one-directional:
//! each stage wraps the previous value instead of mutating it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

/// Rectangle used to bias text search towards a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub low: LatLng,
    pub high: LatLng,
}

impl BoundingBox {
    /// The whole globe. Used when a city cannot be geocoded.
    pub const WORLD: BoundingBox = BoundingBox {
        low: LatLng {
            latitude: -90.0,
            longitude: -180.0,
        },
        high: LatLng {
            latitude: 90.0,
            longitude: 180.0,
        },
    };
}

/// One business as returned by the search provider.
///
/// `place_id` is always non-empty; the fetch layer drops records without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    /// Phone number included by the search field mask, if any.
    pub listed_phone: Option<String>,
    /// Website included by the search field mask, if any.
    pub listed_website: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValueTier {
    Standard,
    Medium,
    High,
    Premium,
}

impl ValueTier {
    /// Maps a 0–100 value score onto its tier.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ValueTier::Premium,
            60..=79 => ValueTier::High,
            40..=59 => ValueTier::Medium,
            _ => ValueTier::Standard,
        }
    }

    /// Lowest score that lands in this tier.
    #[must_use]
    pub fn min_score(self) -> u8 {
        match self {
            ValueTier::Standard => 0,
            ValueTier::Medium => 40,
            ValueTier::High => 60,
            ValueTier::Premium => 80,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValueTier::Standard => "Standard",
            ValueTier::Medium => "Medium",
            ValueTier::High => "High",
            ValueTier::Premium => "Premium",
        }
    }
}

impl std::fmt::Display for ValueTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ValueTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(ValueTier::Standard),
            "medium" => Ok(ValueTier::Medium),
            "high" => Ok(ValueTier::High),
            "premium" => Ok(ValueTier::Premium),
            other => Err(format!(
                "unknown value tier '{other}'; expected standard, medium, high, or premium"
            )),
        }
    }
}

/// A place with its computed value score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredLead {
    #[serde(flatten)]
    pub place: RawPlace,
    pub value_score: u8,
    pub value_tier: ValueTier,
}

/// Where a lead's email address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailSource {
    /// Found in the provider's editorial summary or review text.
    ProviderText,
    /// Found on the business homepage.
    WebsiteScrape,
    /// `info@<domain>` guess. Not a verified contact.
    DomainGuess,
}

impl EmailSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EmailSource::ProviderText => "provider_text",
            EmailSource::WebsiteScrape => "website_scrape",
            EmailSource::DomainGuess => "domain_guess",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentOutcome {
    Enriched,
    /// Details lookup timed out or errored; contact fields are null.
    Failed,
    /// Lead was beyond the enrichment limit or enrichment is disabled.
    Skipped,
}

impl EnrichmentOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EnrichmentOutcome::Enriched => "enriched",
            EnrichmentOutcome::Failed => "failed",
            EnrichmentOutcome::Skipped => "skipped",
        }
    }

    /// Parses the stored form. Unknown values map to `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "enriched" => Some(EnrichmentOutcome::Enriched),
            "failed" => Some(EnrichmentOutcome::Failed),
            "skipped" => Some(EnrichmentOutcome::Skipped),
            _ => None,
        }
    }
}

/// Pipeline output handed to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLead {
    #[serde(flatten)]
    pub lead: ScoredLead,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub email_source: Option<EmailSource>,
    pub business_status: Option<String>,
    pub enrichment: EnrichmentOutcome,
}

impl EnrichedLead {
    /// A lead whose details lookup failed. All contact fields are null.
    #[must_use]
    pub fn failed(lead: ScoredLead) -> Self {
        Self {
            lead,
            phone: None,
            website: None,
            email: None,
            email_source: None,
            business_status: None,
            enrichment: EnrichmentOutcome::Failed,
        }
    }

    /// A lead that was not sent for enrichment. Keeps whatever contact
    /// fields the search response already carried.
    #[must_use]
    pub fn skipped(lead: ScoredLead) -> Self {
        let phone = lead.place.listed_phone.clone();
        let website = lead.place.listed_website.clone();
        Self {
            lead,
            phone,
            website,
            email: None,
            email_source: None,
            business_status: None,
            enrichment: EnrichmentOutcome::Skipped,
        }
    }

    #[must_use]
    pub fn place_id(&self) -> &str {
        &self.lead.place.place_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.lead.place.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> RawPlace {
        RawPlace {
            place_id: id.to_string(),
            name: "ABC Plumbing".to_string(),
            address: Some("1 Main St, Miami, FL".to_string()),
            rating: Some(4.5),
            review_count: Some(12),
            listed_phone: Some("(305) 555-0100".to_string()),
            listed_website: Some("https://abc.example".to_string()),
        }
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(ValueTier::from_score(0), ValueTier::Standard);
        assert_eq!(ValueTier::from_score(39), ValueTier::Standard);
        assert_eq!(ValueTier::from_score(40), ValueTier::Medium);
        assert_eq!(ValueTier::from_score(59), ValueTier::Medium);
        assert_eq!(ValueTier::from_score(60), ValueTier::High);
        assert_eq!(ValueTier::from_score(79), ValueTier::High);
        assert_eq!(ValueTier::from_score(80), ValueTier::Premium);
        assert_eq!(ValueTier::from_score(100), ValueTier::Premium);
    }

    #[test]
    fn min_score_is_the_tier_floor() {
        for tier in [
            ValueTier::Standard,
            ValueTier::Medium,
            ValueTier::High,
            ValueTier::Premium,
        ] {
            assert_eq!(ValueTier::from_score(tier.min_score()), tier);
        }
        assert_eq!(ValueTier::from_score(ValueTier::High.min_score() - 1), ValueTier::Medium);
    }

    #[test]
    fn outcome_round_trips_through_stored_form() {
        assert_eq!(EnrichmentOutcome::parse("failed"), Some(EnrichmentOutcome::Failed));
        assert_eq!(EnrichmentOutcome::Enriched.as_str(), "enriched");
        assert!(EnrichmentOutcome::parse("pending").is_none());
    }

    #[test]
    fn tier_ordering_follows_value() {
        assert!(ValueTier::Premium > ValueTier::High);
        assert!(ValueTier::High > ValueTier::Medium);
        assert!(ValueTier::Medium > ValueTier::Standard);
    }

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!("premium".parse::<ValueTier>(), Ok(ValueTier::Premium));
        assert_eq!("High".parse::<ValueTier>(), Ok(ValueTier::High));
        assert!("gold".parse::<ValueTier>().is_err());
    }

    #[test]
    fn failed_lead_has_null_contact_fields() {
        let scored = ScoredLead {
            place: place("p1"),
            value_score: 50,
            value_tier: ValueTier::Medium,
        };
        let lead = EnrichedLead::failed(scored);
        assert!(lead.phone.is_none());
        assert!(lead.website.is_none());
        assert!(lead.email.is_none());
        assert_eq!(lead.enrichment, EnrichmentOutcome::Failed);
    }

    #[test]
    fn skipped_lead_keeps_search_contact_fields() {
        let scored = ScoredLead {
            place: place("p1"),
            value_score: 50,
            value_tier: ValueTier::Medium,
        };
        let lead = EnrichedLead::skipped(scored);
        assert_eq!(lead.phone.as_deref(), Some("(305) 555-0100"));
        assert_eq!(lead.website.as_deref(), Some("https://abc.example"));
        assert!(lead.email.is_none());
        assert_eq!(lead.enrichment, EnrichmentOutcome::Skipped);
    }

    #[test]
    fn enriched_lead_serializes_flat_camel_case() {
        let scored = ScoredLead {
            place: place("p1"),
            value_score: 72,
            value_tier: ValueTier::High,
        };
        let lead = EnrichedLead::skipped(scored);
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["placeId"], "p1");
        assert_eq!(json["valueScore"], 72);
        assert_eq!(json["valueTier"], "High");
        assert_eq!(json["reviewCount"], 12);
        assert_eq!(json["enrichment"], "skipped");
        assert!(json["email"].is_null());
        assert_eq!(json["phone"], "(305) 555-0100");
        assert_eq!(json["listedPhone"], "(305) 555-0100");
    }
}
