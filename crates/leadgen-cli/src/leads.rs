//! `leads` commands: read-only queries over stored leads.

use clap::Subcommand;
use leadgen_core::ValueTier;
use leadgen_db::{LeadFilter, DEFAULT_LIST_LIMIT};

use crate::{clip, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum LeadsCommands {
    /// List stored leads, best first
    List {
        /// Filter by city as given to `search`
        #[arg(long)]
        city: Option<String>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Only leads at or above this tier (standard, medium, high, premium)
        #[arg(long)]
        min_tier: Option<ValueTier>,
        /// Maximum number of leads to show
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: i64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

/// Print stored leads matching `filter`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_leads_list(
    pool: &sqlx::PgPool,
    filter: &LeadFilter,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rows = leadgen_db::list_leads(pool, filter).await?;

    if format == OutputFormat::Json {
        let values: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "placeId": row.place_id,
                    "name": row.name,
                    "address": row.address,
                    "rating": row.rating,
                    "reviewCount": row.review_count,
                    "valueScore": row.value_score,
                    "valueTier": row.value_tier,
                    "phone": row.phone,
                    "website": row.website,
                    "email": row.email,
                    "emailSource": row.email_source,
                    "city": row.city,
                    "category": row.category,
                    "performanceScore": row.performance_score,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no leads found; run `search --persist` first");
        return Ok(());
    }

    println!(
        "{:<36}{:<7}{:<9}{:<18}{:<20}EMAIL",
        "NAME", "SCORE", "TIER", "PHONE", "CITY"
    );
    for row in &rows {
        println!(
            "{:<36}{:<7}{:<9}{:<18}{:<20}{}",
            clip(&row.name, 32),
            row.value_score,
            row.value_tier,
            row.phone.as_deref().unwrap_or("-"),
            clip(&row.city, 18),
            row.email.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
