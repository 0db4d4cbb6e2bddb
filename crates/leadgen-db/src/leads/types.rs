//! Row types for the `leads` table.

use chrono::{DateTime, Utc};
use leadgen_core::{EnrichedLead, ValueTier};
use uuid::Uuid;

/// Default page size for [`super::list_leads`].
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Input record for inserting a pipeline result.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub value_score: i16,
    pub value_tier: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub email_source: Option<String>,
    pub business_status: Option<String>,
    pub enrichment: String,
    pub city: String,
    pub category: String,
    pub contributed_by: Option<String>,
}

impl NewLead {
    /// Flattens an enriched lead together with the search that produced it.
    #[must_use]
    pub fn from_enriched(
        lead: &EnrichedLead,
        city: &str,
        category: &str,
        contributed_by: Option<&str>,
    ) -> Self {
        let place = &lead.lead.place;
        Self {
            place_id: place.place_id.clone(),
            name: place.name.clone(),
            address: place.address.clone(),
            rating: place.rating,
            review_count: place
                .review_count
                .map(|count| i32::try_from(count).unwrap_or(i32::MAX)),
            value_score: i16::from(lead.lead.value_score),
            value_tier: lead.lead.value_tier.as_str().to_string(),
            phone: lead.phone.clone(),
            website: lead.website.clone(),
            email: lead.email.clone(),
            email_source: lead.email_source.map(|s| s.as_str().to_string()),
            business_status: lead.business_status.clone(),
            enrichment: lead.enrichment.as_str().to_string(),
            city: city.to_string(),
            category: category.to_string(),
            contributed_by: contributed_by.map(str::to_string),
        }
    }
}

/// A row from the `leads` table.
///
/// `performance_data` is omitted; it is the raw audit payload and only
/// written, never listed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeadRow {
    pub id: i64,
    pub public_id: Uuid,
    pub place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    /// The schema constrains this to `0..=100`.
    pub value_score: i16,
    pub value_tier: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub email_source: Option<String>,
    pub business_status: Option<String>,
    pub enrichment: String,
    pub city: String,
    pub category: String,
    pub contributed_by: Option<String>,
    pub performance_score: Option<i16>,
    pub audited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for [`super::list_leads`]. `None` fields match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadFilter {
    pub city: Option<String>,
    pub category: Option<String>,
    pub min_tier: Option<ValueTier>,
    pub limit: i64,
}

impl Default for LeadFilter {
    fn default() -> Self {
        Self {
            city: None,
            category: None,
            min_tier: None,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl LeadFilter {
    /// Minimum `value_score` implied by `min_tier`.
    #[must_use]
    pub fn min_score(&self) -> i16 {
        self.min_tier.map_or(0, |tier| i16::from(tier.min_score()))
    }
}
