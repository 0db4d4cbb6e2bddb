//! `search` command: runs the pipeline once per (city, category) pair.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use leadgen_core::{AppConfig, EnrichedLead, Heuristics};
use leadgen_pipeline::{EnrichmentMode, HttpPageFetcher, LeadPipeline, PipelineConfig, QueryStyle};
use leadgen_places::GooglePlacesClient;
use serde::Serialize;

use crate::{clip, OutputFormat};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// City to search, e.g. "Miami, FL" (repeatable)
    #[arg(long = "city", required = true)]
    pub cities: Vec<String>,
    /// Business category, e.g. "Plumbing" (repeatable)
    #[arg(long = "category", required = true)]
    pub categories: Vec<String>,
    /// Cap per combination; defaults to LEADGEN_DEFAULT_MAX_LEADS
    #[arg(long)]
    pub max_leads: Option<usize>,
    /// Search every synonym for the category instead of one query
    #[arg(long)]
    pub expanded: bool,
    /// Only enrich the top N leads of each combination
    #[arg(long)]
    pub enrich_limit: Option<usize>,
    /// Skip details lookups and email discovery entirely
    #[arg(long, conflicts_with = "enrich_limit")]
    pub no_enrich: bool,
    /// Store results, skipping place ids already in the database
    #[arg(long)]
    pub persist: bool,
    /// Recorded on persisted rows
    #[arg(long, requires = "persist")]
    pub contributed_by: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchReport<'a> {
    city: &'a str,
    category: &'a str,
    leads: &'a [EnrichedLead],
}

/// Run the pipeline for every requested combination.
///
/// A failed combination is reported and skipped unless the failure is a
/// credential or setup problem, which stops the command at once.
///
/// # Errors
///
/// Returns an error if the API key is missing or rejected, a client cannot
/// be built, the database is unreachable with `--persist`, or every run
/// failed.
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let api_key = config.require_places_api_key()?;
    let places = Arc::new(
        GooglePlacesClient::new(api_key, config.http_timeout_secs, &config.user_agent)
            .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?,
    );
    let pages = Arc::new(HttpPageFetcher::new(
        Duration::from_millis(config.scrape_timeout_ms),
        &config.user_agent,
    )?);

    let pipeline = LeadPipeline::new(
        places.clone(),
        places.clone(),
        pages,
        pipeline_config(config, args)?,
    )?
    .with_geocoder(places);

    let pool = if args.persist {
        Some(leadgen_db::connect_from_app_config(config).await?)
    } else {
        None
    };

    let max_leads = args.max_leads.unwrap_or(config.default_max_leads);
    run_combinations(&pipeline, args, max_leads, pool.as_ref()).await
}

/// Runs every (city, category) pair serially, printing and optionally
/// persisting each result.
///
/// # Errors
///
/// Returns the first configuration failure immediately. Other failures are
/// reported and skipped; an error is returned only when every pair failed
/// or persisting a result failed.
pub(crate) async fn run_combinations(
    pipeline: &LeadPipeline,
    args: &SearchArgs,
    max_leads: usize,
    pool: Option<&sqlx::PgPool>,
) -> anyhow::Result<()> {
    let total = args.cities.len() * args.categories.len();
    let mut failures = 0_usize;
    tracing::info!(
        combinations = total,
        max_leads,
        query_style = ?pipeline.config().query_style,
        enrichment = ?pipeline.config().enrichment.mode,
        "starting search"
    );

    for city in &args.cities {
        for category in &args.categories {
            let leads = match pipeline.run(city, category, max_leads).await {
                Ok(leads) => leads,
                Err(e) if e.is_configuration() => {
                    tracing::error!(
                        city = %city,
                        category = %category,
                        error = %e,
                        "search aborted"
                    );
                    return Err(e.into());
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!(
                        city = %city,
                        category = %category,
                        error = %e,
                        "search failed"
                    );
                    eprintln!("error: {city} / {category}: {e}");
                    continue;
                }
            };

            print_leads(city, category, &leads, args.format)?;

            if let Some(pool) = pool {
                let rows: Vec<leadgen_db::NewLead> = leads
                    .iter()
                    .map(|lead| {
                        leadgen_db::NewLead::from_enriched(
                            lead,
                            city,
                            category,
                            args.contributed_by.as_deref(),
                        )
                    })
                    .collect();
                let (inserted, skipped) = leadgen_db::insert_leads(pool, &rows).await?;
                tracing::info!(
                    city = %city,
                    category = %category,
                    inserted,
                    skipped,
                    "persisted leads"
                );
                if args.format == OutputFormat::Table {
                    println!("stored {inserted} new lead(s), {skipped} already known");
                }
            }
        }
    }

    if total > 0 && failures == total {
        anyhow::bail!("all {total} search combination(s) failed");
    }

    Ok(())
}

fn pipeline_config(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<PipelineConfig> {
    let heuristics = match &config.heuristics_path {
        Some(path) => leadgen_core::load_heuristics(path)?,
        None => Heuristics::default(),
    };

    let mut pipeline = PipelineConfig::from_app_config(config, heuristics);
    if args.expanded {
        pipeline.query_style = QueryStyle::Expanded;
    }
    if args.no_enrich {
        pipeline.enrichment.mode = EnrichmentMode::Disabled;
    }
    pipeline.enrichment.limit = args.enrich_limit;
    Ok(pipeline)
}

fn print_leads(
    city: &str,
    category: &str,
    leads: &[EnrichedLead],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let report = SearchReport {
                city,
                category,
                leads,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            println!("{category} in {city}: {} lead(s)", leads.len());
            if leads.is_empty() {
                return Ok(());
            }
            println!(
                "{:<36}{:<7}{:<9}{:<18}EMAIL",
                "NAME", "SCORE", "TIER", "PHONE"
            );
            for lead in leads {
                println!(
                    "{:<36}{:<7}{:<9}{:<18}{}",
                    clip(lead.name(), 32),
                    lead.lead.value_score,
                    lead.lead.value_tier,
                    lead.phone.as_deref().unwrap_or("-"),
                    lead.email.as_deref().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}
