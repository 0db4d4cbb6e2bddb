//! Runs the three audit components concurrently and combines them.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::pagespeed::{DesktopReport, MobileReport, PageSpeedClient};
use crate::score::{recommendations, weighted_score, RevenueImpact};
use crate::ui::{analyze_ui, UiReport};

/// Combined audit result. Serialized as the lead's performance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteAudit {
    pub url: String,
    pub performance_score: u8,
    pub pagespeed: Option<DesktopReport>,
    pub ui: Option<UiReport>,
    pub mobile: Option<MobileReport>,
    pub revenue_impact: RevenueImpact,
    pub recommendations: Vec<String>,
    pub audited_at: DateTime<Utc>,
}

pub struct WebsiteAuditor {
    pagespeed: Option<PageSpeedClient>,
    client: Client,
}

impl WebsiteAuditor {
    /// `pagespeed` is optional; without it only the UI component is measured.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Http`] if the homepage client cannot be built.
    pub fn new(
        pagespeed: Option<PageSpeedClient>,
        page_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, AuditError> {
        let client = Client::builder()
            .timeout(page_timeout)
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { pagespeed, client })
    }

    /// Audits `url`. Components that fail are logged and left out of the
    /// weighted score.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidUrl`] for a non-HTTP(S) URL, or
    /// [`AuditError::NothingMeasured`] when every component failed.
    pub async fn audit(&self, url: &str) -> Result<WebsiteAudit, AuditError> {
        let parsed = Url::parse(url.trim()).map_err(|_| AuditError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AuditError::InvalidUrl(url.to_string()));
        }
        let url = parsed.as_str();

        let (desktop, ui, mobile) =
            tokio::join!(self.desktop(url), self.ui(url), self.mobile(url));

        let desktop = keep(desktop, url, "pagespeed");
        let ui = keep(ui, url, "ui");
        let mobile = keep(mobile, url, "mobile");

        let performance_score = weighted_score(
            desktop.as_ref().map(|d| d.performance),
            ui.as_ref().map(|u| u.score),
            mobile.as_ref().map(|m| m.score),
        )
        .ok_or_else(|| AuditError::NothingMeasured {
            url: url.to_string(),
        })?;

        let recommendations = recommendations(desktop.as_ref(), ui.as_ref(), mobile.as_ref());
        tracing::info!(url, performance_score, "website audit complete");

        Ok(WebsiteAudit {
            url: url.to_string(),
            performance_score,
            pagespeed: desktop,
            ui,
            mobile,
            revenue_impact: RevenueImpact::from_score(performance_score),
            recommendations,
            audited_at: Utc::now(),
        })
    }

    async fn desktop(&self, url: &str) -> Option<Result<DesktopReport, AuditError>> {
        match &self.pagespeed {
            Some(client) => Some(client.desktop_report(url).await),
            None => None,
        }
    }

    async fn mobile(&self, url: &str) -> Option<Result<MobileReport, AuditError>> {
        match &self.pagespeed {
            Some(client) => Some(client.mobile_report(url).await),
            None => None,
        }
    }

    async fn ui(&self, url: &str) -> Option<Result<UiReport, AuditError>> {
        Some(self.fetch_homepage(url).await.map(|html| analyze_ui(url, &html)))
    }

    async fn fetch_homepage(&self, url: &str) -> Result<String, AuditError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::Status {
                status: status.as_u16(),
                endpoint: url.to_string(),
                body: String::new(),
            });
        }
        Ok(response.text().await?)
    }
}

fn keep<T>(result: Option<Result<T, AuditError>>, url: &str, component: &str) -> Option<T> {
    match result? {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!(url, component, error = %e, "audit component failed");
            None
        }
    }
}
