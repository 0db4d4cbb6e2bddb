//! PageSpeed Insights v5 client.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::AuditError;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/pagespeedonline/v5/";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Desktop,
    Mobile,
}

impl Strategy {
    fn as_param(self) -> &'static str {
        match self {
            Strategy::Desktop => "desktop",
            Strategy::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopReport {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
    pub first_contentful_paint: Option<String>,
    pub largest_contentful_paint: Option<String>,
    pub cumulative_layout_shift: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileReport {
    /// Mean of performance and accessibility, rounded.
    pub score: u8,
    pub performance: u8,
    pub accessibility: u8,
    pub viewport_ok: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunPagespeedResponse {
    lighthouse_result: LighthouseResult,
}

#[derive(Debug, Deserialize)]
struct LighthouseResult {
    #[serde(default)]
    categories: HashMap<String, LighthouseCategory>,
    #[serde(default)]
    audits: HashMap<String, LighthouseAudit>,
}

#[derive(Debug, Deserialize)]
struct LighthouseCategory {
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LighthouseAudit {
    score: Option<f64>,
    display_value: Option<String>,
}

impl LighthouseResult {
    fn category(&self, key: &str) -> Result<u8, AuditError> {
        self.categories
            .get(key)
            .and_then(|c| c.score)
            .map(to_percent)
            .ok_or_else(|| AuditError::MissingCategory(key.to_string()))
    }

    fn display_value(&self, key: &str) -> Option<String> {
        self.audits.get(key).and_then(|a| a.display_value.clone())
    }
}

/// Lighthouse scores are 0.0–1.0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Client for the `runPagespeed` endpoint. Use [`PageSpeedClient::with_base_url`]
/// to point at a mock server in tests.
pub struct PageSpeedClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

impl PageSpeedClient {
    /// The API works without a key at a much lower quota.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, AuditError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`AuditError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`AuditError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, AuditError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| AuditError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url,
        })
    }

    /// Desktop run over all four categories.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] on transport failure, non-2xx status, an
    /// unparseable body, or a category without a score.
    pub async fn desktop_report(&self, site_url: &str) -> Result<DesktopReport, AuditError> {
        let result = self
            .run(
                site_url,
                Strategy::Desktop,
                &["PERFORMANCE", "ACCESSIBILITY", "BEST_PRACTICES", "SEO"],
            )
            .await?;

        Ok(DesktopReport {
            performance: result.category("performance")?,
            accessibility: result.category("accessibility")?,
            best_practices: result.category("best-practices")?,
            seo: result.category("seo")?,
            first_contentful_paint: result.display_value("first-contentful-paint"),
            largest_contentful_paint: result.display_value("largest-contentful-paint"),
            cumulative_layout_shift: result.display_value("cumulative-layout-shift"),
        })
    }

    /// Mobile run over performance and accessibility.
    ///
    /// # Errors
    ///
    /// Same as [`Self::desktop_report`].
    pub async fn mobile_report(&self, site_url: &str) -> Result<MobileReport, AuditError> {
        let result = self
            .run(site_url, Strategy::Mobile, &["PERFORMANCE", "ACCESSIBILITY"])
            .await?;

        let performance = result.category("performance")?;
        let accessibility = result.category("accessibility")?;
        let mean = (u16::from(performance) + u16::from(accessibility) + 1) / 2;
        Ok(MobileReport {
            score: u8::try_from(mean).unwrap_or(100),
            performance,
            accessibility,
            viewport_ok: result
                .audits
                .get("viewport")
                .and_then(|a| a.score)
                .is_some_and(|s| s >= 1.0),
        })
    }

    fn build_url(&self, site_url: &str, strategy: Strategy, categories: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("runPagespeed");
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("url", site_url);
            pairs.append_pair("strategy", strategy.as_param());
            for category in categories {
                pairs.append_pair("category", category);
            }
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        url
    }

    async fn run(
        &self,
        site_url: &str,
        strategy: Strategy,
        categories: &[&str],
    ) -> Result<LighthouseResult, AuditError> {
        let url = self.build_url(site_url, strategy, categories);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuditError::Status {
                status: status.as_u16(),
                endpoint: "runPagespeed".to_string(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: RunPagespeedResponse =
            serde_json::from_str(&body).map_err(|e| AuditError::Deserialize {
                context: format!("runPagespeed({}, {})", site_url, strategy.as_param()),
                source: e,
            })?;
        Ok(parsed.lighthouse_result)
    }
}
