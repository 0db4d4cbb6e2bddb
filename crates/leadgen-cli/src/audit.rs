//! `audit` command: scores one website and optionally stores the result.

use std::time::Duration;

use leadgen_audit::{PageSpeedClient, WebsiteAudit, WebsiteAuditor};
use leadgen_core::AppConfig;

const PAGESPEED_TIMEOUT_SECS: u64 = 10;

/// Audit `url` and print the result. With `place_id`, the audit is also
/// written onto that stored lead.
///
/// # Errors
///
/// Returns an error if the URL is invalid, nothing could be measured, or
/// the lead cannot be updated.
pub(crate) async fn run_audit(
    config: &AppConfig,
    url: &str,
    place_id: Option<&str>,
    skip_pagespeed: bool,
) -> anyhow::Result<()> {
    let pagespeed = if skip_pagespeed {
        None
    } else {
        if config.pagespeed_api_key.is_none() {
            tracing::warn!("PAGESPEED_API_KEY is not set; using the unauthenticated quota");
        }
        Some(PageSpeedClient::new(
            config.pagespeed_api_key.as_deref(),
            PAGESPEED_TIMEOUT_SECS,
            &config.user_agent,
        )?)
    };

    let auditor = WebsiteAuditor::new(
        pagespeed,
        Duration::from_millis(config.scrape_timeout_ms),
        &config.user_agent,
    )?;
    let audit = auditor.audit(url).await?;
    print_audit(&audit);

    if let Some(place_id) = place_id {
        let pool = leadgen_db::connect_from_app_config(config).await?;
        let data = serde_json::to_value(&audit)?;
        leadgen_db::record_website_audit(
            &pool,
            place_id,
            i16::from(audit.performance_score),
            &data,
        )
        .await
        .map_err(|e| match e {
            leadgen_db::DbError::NotFound => {
                anyhow::anyhow!("no stored lead with place id '{place_id}'")
            }
            other => other.into(),
        })?;
        println!("stored audit on lead {place_id}");
    }

    Ok(())
}

fn print_audit(audit: &WebsiteAudit) {
    println!("Website: {}", audit.url);
    println!("Performance score: {}/100", audit.performance_score);
    println!("Revenue impact: {}", audit.revenue_impact);
    if let Some(desktop) = &audit.pagespeed {
        println!(
            "PageSpeed: performance {} / accessibility {} / best practices {} / SEO {}",
            desktop.performance, desktop.accessibility, desktop.best_practices, desktop.seo
        );
    }
    if let Some(mobile) = &audit.mobile {
        println!("Mobile: {}", mobile.score);
    }
    if let Some(ui) = &audit.ui {
        println!("UI: {}", ui.score);
        for issue in &ui.issues {
            println!("  - {issue}");
        }
    }
    if !audit.recommendations.is_empty() {
        println!("Recommendations:");
        for recommendation in &audit.recommendations {
            println!("  - {recommendation}");
        }
    }
}
