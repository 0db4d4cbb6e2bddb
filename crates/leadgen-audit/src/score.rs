//! Weighted performance score, revenue-impact label, and recommendations.

use serde::{Deserialize, Serialize};

use crate::pagespeed::{DesktopReport, MobileReport};
use crate::ui::UiReport;

const PAGESPEED_WEIGHT: f64 = 0.5;
const UI_WEIGHT: f64 = 0.25;
const MOBILE_WEIGHT: f64 = 0.25;
const RECOMMENDATION_THRESHOLD: u8 = 70;

/// 50% PageSpeed performance, 25% UI, 25% mobile. Components that could not
/// be measured are left out and the remaining weights renormalised.
/// `None` when nothing was measured.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn weighted_score(pagespeed: Option<u8>, ui: Option<u8>, mobile: Option<u8>) -> Option<u8> {
    let parts = [
        (pagespeed, PAGESPEED_WEIGHT),
        (ui, UI_WEIGHT),
        (mobile, MOBILE_WEIGHT),
    ];
    let (sum, weight) = parts
        .iter()
        .filter_map(|(score, weight)| score.map(|s| (f64::from(s) * weight, *weight)))
        .fold((0.0, 0.0), |(sum, total), (part, w)| (sum + part, total + w));

    if weight <= 0.0 {
        return None;
    }
    Some((sum / weight).round().clamp(0.0, 100.0) as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueImpact {
    High,
    Good,
    Moderate,
    Low,
    VeryLow,
}

impl RevenueImpact {
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => RevenueImpact::High,
            75..=89 => RevenueImpact::Good,
            60..=74 => RevenueImpact::Moderate,
            40..=59 => RevenueImpact::Low,
            _ => RevenueImpact::VeryLow,
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            RevenueImpact::High => {
                "High Revenue Potential - Excellent user experience drives conversions"
            }
            RevenueImpact::Good => {
                "Good Revenue Potential - Above average performance supports growth"
            }
            RevenueImpact::Moderate => {
                "Moderate Revenue Potential - Performance improvements could boost revenue"
            }
            RevenueImpact::Low => {
                "Low Revenue Potential - Poor performance likely hurts conversions"
            }
            RevenueImpact::VeryLow => {
                "Very Low Revenue Potential - Critical performance issues need immediate attention"
            }
        }
    }
}

impl std::fmt::Display for RevenueImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// One entry per component scoring below 70, then the UI issue list.
/// Unmeasured components contribute nothing.
#[must_use]
pub fn recommendations(
    pagespeed: Option<&DesktopReport>,
    ui: Option<&UiReport>,
    mobile: Option<&MobileReport>,
) -> Vec<String> {
    let mut out = Vec::new();

    if pagespeed.is_some_and(|p| p.performance < RECOMMENDATION_THRESHOLD) {
        out.push(
            "Optimize page loading speed - consider image compression and caching".to_string(),
        );
    }
    if ui.is_some_and(|u| u.score < RECOMMENDATION_THRESHOLD) {
        out.push("Modernize website design - update to current UI/UX standards".to_string());
    }
    if mobile.is_some_and(|m| m.score < RECOMMENDATION_THRESHOLD) {
        out.push(
            "Improve mobile experience - ensure responsive design and fast mobile loading"
                .to_string(),
        );
    }
    if let Some(ui) = ui.filter(|u| !u.issues.is_empty()) {
        out.push(format!("Address UI issues: {}", ui.issues.join(", ")));
    }

    if out.is_empty() {
        out.push("Website performance is excellent - maintain current standards".to_string());
    }
    out
}
