//! Write operations for the `leads` table.

use sqlx::PgPool;
use uuid::Uuid;

use super::types::NewLead;
use crate::DbError;

/// Insert leads whose `place_id` is not already stored.
///
/// Returns `(inserted, skipped)`. A lead is skipped when an earlier run (or
/// an earlier row in the same batch) already stored its `place_id`; stored
/// rows are never overwritten.
///
/// The whole batch goes through one `INSERT … SELECT * FROM UNNEST(…)`
/// round-trip.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn insert_leads(pool: &PgPool, leads: &[NewLead]) -> Result<(u64, u64), DbError> {
    if leads.is_empty() {
        return Ok((0, 0));
    }

    // Collect each column into a parallel Vec for UNNEST binding.
    let mut public_ids: Vec<Uuid> = Vec::with_capacity(leads.len());
    let mut place_ids: Vec<String> = Vec::with_capacity(leads.len());
    let mut names: Vec<String> = Vec::with_capacity(leads.len());
    let mut addresses: Vec<Option<String>> = Vec::with_capacity(leads.len());
    let mut ratings: Vec<Option<f64>> = Vec::with_capacity(leads.len());
    let mut review_counts: Vec<Option<i32>> = Vec::with_capacity(leads.len());
    let mut value_scores: Vec<i16> = Vec::with_capacity(leads.len());
    let mut value_tiers: Vec<String> = Vec::with_capacity(leads.len());
    let mut phones: Vec<Option<String>> = Vec::with_capacity(leads.len());
    let mut websites: Vec<Option<String>> = Vec::with_capacity(leads.len());
    let mut emails: Vec<Option<String>> = Vec::with_capacity(leads.len());
    let mut email_sources: Vec<Option<String>> = Vec::with_capacity(leads.len());
    let mut business_statuses: Vec<Option<String>> = Vec::with_capacity(leads.len());
    let mut enrichments: Vec<String> = Vec::with_capacity(leads.len());
    let mut cities: Vec<String> = Vec::with_capacity(leads.len());
    let mut categories: Vec<String> = Vec::with_capacity(leads.len());
    let mut contributors: Vec<Option<String>> = Vec::with_capacity(leads.len());

    for lead in leads {
        public_ids.push(Uuid::new_v4());
        place_ids.push(lead.place_id.clone());
        names.push(lead.name.clone());
        addresses.push(lead.address.clone());
        ratings.push(lead.rating);
        review_counts.push(lead.review_count);
        value_scores.push(lead.value_score.clamp(0, 100));
        value_tiers.push(lead.value_tier.clone());
        phones.push(lead.phone.clone());
        websites.push(lead.website.clone());
        emails.push(lead.email.clone());
        email_sources.push(lead.email_source.clone());
        business_statuses.push(lead.business_status.clone());
        enrichments.push(lead.enrichment.clone());
        cities.push(lead.city.clone());
        categories.push(lead.category.clone());
        contributors.push(lead.contributed_by.clone());
    }

    let inserted: Vec<String> = sqlx::query_scalar::<_, String>(
        "INSERT INTO leads \
             (public_id, place_id, name, address, rating, review_count, value_score, \
              value_tier, phone, website, email, email_source, business_status, \
              enrichment, city, category, contributed_by) \
         SELECT * FROM UNNEST(\
              $1::uuid[], $2::text[], $3::text[], $4::text[], $5::float8[], $6::int4[], \
              $7::int2[], $8::text[], $9::text[], $10::text[], $11::text[], $12::text[], \
              $13::text[], $14::text[], $15::text[], $16::text[], $17::text[]) \
         ON CONFLICT (place_id) DO NOTHING \
         RETURNING place_id",
    )
    .bind(&public_ids)
    .bind(&place_ids)
    .bind(&names)
    .bind(&addresses)
    .bind(&ratings)
    .bind(&review_counts)
    .bind(&value_scores)
    .bind(&value_tiers)
    .bind(&phones)
    .bind(&websites)
    .bind(&emails)
    .bind(&email_sources)
    .bind(&business_statuses)
    .bind(&enrichments)
    .bind(&cities)
    .bind(&categories)
    .bind(&contributors)
    .fetch_all(pool)
    .await?;

    let inserted_count = inserted.len() as u64;
    let skipped_count = leads.len() as u64 - inserted_count;

    Ok((inserted_count, skipped_count))
}

/// Store a website audit result on the lead identified by `place_id`.
///
/// Overwrites any earlier audit for the same lead.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no lead has that `place_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn record_website_audit(
    pool: &PgPool,
    place_id: &str,
    performance_score: i16,
    performance_data: &serde_json::Value,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE leads \
         SET performance_score = $2, \
             performance_data  = $3, \
             audited_at        = NOW(), \
             updated_at        = NOW() \
         WHERE place_id = $1",
    )
    .bind(place_id)
    .bind(performance_score.clamp(0, 100))
    .bind(performance_data)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
