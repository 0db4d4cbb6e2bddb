mod audit;
mod leads;
mod search;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use leads::LeadsCommands;
use search::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "leadgen")]
#[command(about = "Discover, score, and enrich local business leads")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the ingestion pipeline for every (city, category) combination
    Search(SearchArgs),
    /// Audit a business website
    Audit {
        /// Homepage to audit
        #[arg(long)]
        url: String,
        /// Store the result on the lead with this place id
        #[arg(long)]
        place_id: Option<String>,
        /// Measure only the homepage heuristics
        #[arg(long)]
        skip_pagespeed: bool,
    },
    /// Query stored leads
    Leads {
        #[command(subcommand)]
        command: LeadsCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = leadgen_core::load_app_config()?;
    init_tracing(&config.log_level);
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Some(Commands::Search(args)) => search::run_search(&config, &args).await?,
        Some(Commands::Audit {
            url,
            place_id,
            skip_pagespeed,
        }) => audit::run_audit(&config, &url, place_id.as_deref(), skip_pagespeed).await?,
        Some(Commands::Leads { command }) => match command {
            LeadsCommands::List {
                city,
                category,
                min_tier,
                limit,
                format,
            } => {
                let pool = leadgen_db::connect_from_app_config(&config).await?;
                let filter = leadgen_db::LeadFilter {
                    city,
                    category,
                    min_tier,
                    limit,
                };
                leads::run_leads_list(&pool, &filter, format).await?;
            }
        },
        Some(Commands::Db { command }) => {
            let pool = leadgen_db::connect_from_app_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    leadgen_db::ping(&pool).await?;
                    println!("database reachable");
                }
                DbCommands::Migrate => {
                    let applied = leadgen_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("no command given; run `leadgen --help`"),
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured log level applies.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Truncate `value` to `max` characters for table display.
fn clip(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max).collect::<String>())
    } else {
        value.to_string()
    }
}
