use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    // Blank values count as unset so `KEY=` in a .env file does not
    // masquerade as a credential.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("LEADGEN_ENV", "development"));
    let log_level = or_default("LEADGEN_LOG_LEVEL", "info");

    let google_places_api_key = optional("GOOGLE_PLACES_API_KEY");
    let pagespeed_api_key = optional("PAGESPEED_API_KEY");
    let database_url = optional("DATABASE_URL");
    let heuristics_path = optional("LEADGEN_HEURISTICS_PATH").map(PathBuf::from);

    let db_max_connections = parse_u32("LEADGEN_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("LEADGEN_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("LEADGEN_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let http_timeout_secs = parse_u64("LEADGEN_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LEADGEN_USER_AGENT", "leadgen/0.1 (lead-discovery)");
    let page_delay_ms = parse_u64("LEADGEN_PAGE_DELAY_MS", "100")?;
    let details_timeout_ms = parse_u64("LEADGEN_DETAILS_TIMEOUT_MS", "3000")?;
    let scrape_timeout_ms = parse_u64("LEADGEN_SCRAPE_TIMEOUT_MS", "5000")?;
    let geocode_timeout_ms = parse_u64("LEADGEN_GEOCODE_TIMEOUT_MS", "1000")?;
    let enrich_batch_size = parse_usize("LEADGEN_ENRICH_BATCH_SIZE", "5")?;
    let enrich_batch_delay_ms = parse_u64("LEADGEN_ENRICH_BATCH_DELAY_MS", "200")?;
    let default_max_leads = parse_usize("LEADGEN_DEFAULT_MAX_LEADS", "25")?;

    if enrich_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEADGEN_ENRICH_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        google_places_api_key,
        pagespeed_api_key,
        database_url,
        heuristics_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        http_timeout_secs,
        user_agent,
        page_delay_ms,
        details_timeout_ms,
        scrape_timeout_ms,
        geocode_timeout_ms,
        enrich_batch_size,
        enrich_batch_delay_ms,
        default_max_leads,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
