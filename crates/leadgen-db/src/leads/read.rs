//! Read operations for the `leads` table.

use sqlx::PgPool;

use super::types::{LeadFilter, LeadRow};
use crate::DbError;

/// Returns stored leads matching `filter`, highest value score first.
///
/// City and category match case-insensitively. Ties on score are broken by
/// most recently created.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_leads(pool: &PgPool, filter: &LeadFilter) -> Result<Vec<LeadRow>, DbError> {
    let rows = sqlx::query_as::<_, LeadRow>(
        "SELECT id, public_id, place_id, name, address, rating, review_count, \
                value_score, value_tier, phone, website, email, email_source, \
                business_status, enrichment, city, category, contributed_by, \
                performance_score, audited_at, created_at, updated_at \
         FROM leads \
         WHERE ($1::TEXT IS NULL OR LOWER(city) = LOWER($1)) \
           AND ($2::TEXT IS NULL OR LOWER(category) = LOWER($2)) \
           AND value_score >= $3 \
         ORDER BY value_score DESC, created_at DESC \
         LIMIT $4",
    )
    .bind(filter.city.as_deref())
    .bind(filter.category.as_deref())
    .bind(filter.min_score())
    .bind(filter.limit.max(1))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
