//! Homepage UI heuristics. Starts at 100 and deducts for dated markup,
//! missing responsive signals, and plain HTTP.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static OUTDATED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<table\b[^>]*\bbgcolor\s*=|<font\b[^>]*\bcolor\s*=|<center\b")
        .expect("valid outdated tag regex")
});
static TIMES_FONT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)font-family\s*:[^;"'}>]*\bTimes\b"#).expect("valid font regex")
});
static VIEWPORT_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*\bname\s*=\s*["']?viewport\b"#).expect("valid viewport regex")
});

const FRAMEWORK_MARKERS: &[&str] = &["react", "vue", "angular", "bootstrap"];
const TIMES_FONT_THRESHOLD: usize = 5;

const OUTDATED_TAGS_PENALTY: u8 = 20;
const TIMES_FONT_PENALTY: u8 = 15;
const NO_FRAMEWORK_PENALTY: u8 = 10;
const NOT_RESPONSIVE_PENALTY: u8 = 15;
const NO_HTTPS_PENALTY: u8 = 10;

pub const ISSUE_OUTDATED_TAGS: &str = "Outdated HTML elements detected";
pub const ISSUE_OUTDATED_TYPOGRAPHY: &str = "Outdated typography detected";
pub const ISSUE_NO_FRAMEWORK: &str = "No modern framework detected";
pub const ISSUE_NOT_RESPONSIVE: &str = "Poor responsive design indicators";
pub const ISSUE_NO_HTTPS: &str = "Not using HTTPS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiReport {
    pub score: u8,
    pub issues: Vec<String>,
    pub has_modern_framework: bool,
    pub has_responsive_design: bool,
}

/// Scores the homepage markup served at `url`.
#[must_use]
pub fn analyze_ui(url: &str, html: &str) -> UiReport {
    let mut score: u8 = 100;
    let mut issues = Vec::new();
    let mut deduct = |points: u8, issue: &str| {
        score = score.saturating_sub(points);
        issues.push(issue.to_string());
    };

    if OUTDATED_TAG_RE.is_match(html) {
        deduct(OUTDATED_TAGS_PENALTY, ISSUE_OUTDATED_TAGS);
    }

    if TIMES_FONT_RE.find_iter(html).count() > TIMES_FONT_THRESHOLD {
        deduct(TIMES_FONT_PENALTY, ISSUE_OUTDATED_TYPOGRAPHY);
    }

    let lowered = html.to_lowercase();
    let has_modern_framework = FRAMEWORK_MARKERS.iter().any(|m| lowered.contains(m));
    if !has_modern_framework {
        deduct(NO_FRAMEWORK_PENALTY, ISSUE_NO_FRAMEWORK);
    }

    let has_responsive_design = VIEWPORT_META_RE.is_match(html) && lowered.contains("@media");
    if !has_responsive_design {
        deduct(NOT_RESPONSIVE_PENALTY, ISSUE_NOT_RESPONSIVE);
    }

    if !url.trim().to_ascii_lowercase().starts_with("https://") {
        deduct(NO_HTTPS_PENALTY, ISSUE_NO_HTTPS);
    }

    UiReport {
        score,
        issues,
        has_modern_framework,
        has_responsive_design,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODERN: &str = r#"<html><head>
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <link rel="stylesheet" href="/css/bootstrap.min.css">
        <style>@media (max-width: 600px) { body { font-size: 14px; } }</style>
        </head><body><h1>Acme</h1></body></html>"#;

    #[test]
    fn modern_https_site_scores_full_marks() {
        let report = analyze_ui("https://acme.example", MODERN);
        assert_eq!(report.score, 100);
        assert!(report.issues.is_empty());
        assert!(report.has_modern_framework);
        assert!(report.has_responsive_design);
    }

    #[test]
    fn plain_http_costs_ten() {
        let report = analyze_ui("http://acme.example", MODERN);
        assert_eq!(report.score, 90);
        assert_eq!(report.issues, vec![ISSUE_NO_HTTPS]);
    }

    #[test]
    fn dated_site_collects_every_penalty() {
        let times = r#"<p style="font-family: Times New Roman">x</p>"#.repeat(6);
        let html = format!(
            r#"<html><body><center><font color="red">Welcome</font></center>{times}</body></html>"#
        );
        let report = analyze_ui("http://old.example", &html);
        assert_eq!(report.score, 100 - 20 - 15 - 10 - 15 - 10);
        assert_eq!(
            report.issues,
            vec![
                ISSUE_OUTDATED_TAGS,
                ISSUE_OUTDATED_TYPOGRAPHY,
                ISSUE_NO_FRAMEWORK,
                ISSUE_NOT_RESPONSIVE,
                ISSUE_NO_HTTPS,
            ]
        );
    }

    #[test]
    fn five_times_declarations_are_tolerated() {
        let times = r#"<p style="font-family: Times">x</p>"#.repeat(5);
        let html = format!("{MODERN}{times}");
        assert_eq!(analyze_ui("https://acme.example", &html).score, 100);
    }

    #[test]
    fn viewport_without_media_queries_is_not_responsive() {
        let html = concat!(
            r#"<meta name="viewport" content="width=device-width">"#,
            r#"<script src="react.js"></script>"#,
        );
        let report = analyze_ui("https://acme.example", html);
        assert!(!report.has_responsive_design);
        assert_eq!(report.score, 85);
    }

    #[test]
    fn table_bgcolor_is_outdated() {
        let table = r##"<table width="100%" bgcolor="#ffffff"><tr><td>x</td></tr></table>"##;
        let html = format!("{MODERN}{table}");
        let report = analyze_ui("https://acme.example", &html);
        assert_eq!(report.score, 80);
        assert_eq!(report.issues, vec![ISSUE_OUTDATED_TAGS]);
    }
}
