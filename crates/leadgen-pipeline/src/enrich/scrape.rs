//! Homepage fetch and email extraction.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, Url};

use super::email::EMAIL_RE;
use crate::error::ScrapeError;

static MAILTO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\b[^>]*\bhref\s*=\s*["']?\s*mailto:([^"'>\s]+)"#)
        .expect("valid mailto regex")
});
static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").expect("valid body regex"));
static NON_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?is)<(script|style|noscript|template)\b[^>]*>",
        r".*?</(script|style|noscript|template)\s*>",
    ))
    .expect("valid non-text regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

const PREFERRED_PREFIXES: &[&str] = &["info@", "contact@", "support@"];

/// Fetches a page's HTML. Implemented over HTTP in production and by
/// in-memory fakes in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let parsed = Url::parse(url).map_err(|_| ScrapeError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidUrl(url.to_string()));
        }

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// The first `mailto:` link anywhere in the document, else an email in the
/// body's visible text. Among text matches, `info@`, `contact@`, and
/// `support@` addresses win over the first match.
#[must_use]
pub fn extract_email_from_html(html: &str) -> Option<String> {
    if let Some(email) = first_mailto(html) {
        return Some(email);
    }

    let text = visible_text(html);
    let candidates: Vec<&str> = EMAIL_RE.find_iter(&text).map(|m| m.as_str()).collect();
    let preferred = candidates.iter().find(|email| {
        let lowered = email.to_ascii_lowercase();
        PREFERRED_PREFIXES.iter().any(|p| lowered.starts_with(p))
    });
    preferred
        .or_else(|| candidates.first())
        .map(|email| (*email).to_string())
}

fn first_mailto(html: &str) -> Option<String> {
    MAILTO_RE.captures_iter(html).find_map(|caps| {
        let target = caps.get(1)?.as_str();
        let address = target.split('?').next().unwrap_or(target);
        let address = address.replace("%40", "@");
        EMAIL_RE.find(&address).map(|m| m.as_str().to_string())
    })
}

fn visible_text(html: &str) -> String {
    let body = BODY_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str());
    let without_code = NON_TEXT_RE.replace_all(body, " ");
    let text = TAG_RE.replace_all(&without_code, " ");
    text.replace("&#64;", "@")
        .replace("&commat;", "@")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailto_link_wins_over_text() {
        let html = r#"<html><body>
            <p>Write to info@acme.example</p>
            <a class="btn" href="mailto:owner@acme.example?subject=Hi">Email us</a>
        </body></html>"#;
        assert_eq!(extract_email_from_html(html).as_deref(), Some("owner@acme.example"));
    }

    #[test]
    fn text_prefers_info_contact_support() {
        let html = "<body><p>jane.doe@acme.example</p><p>Support: support@acme.example</p></body>";
        assert_eq!(extract_email_from_html(html).as_deref(), Some("support@acme.example"));
    }

    #[test]
    fn text_falls_back_to_first_match() {
        let html = "<body><footer>jane@acme.example | bob@acme.example</footer></body>";
        assert_eq!(extract_email_from_html(html).as_deref(), Some("jane@acme.example"));
    }

    #[test]
    fn scripts_and_head_are_ignored() {
        let html = r#"<html><head><meta name="author" content="dev@agency.example"></head>
            <body><script>var e = "tracker@ads.example";</script>
            <p>No email here.</p></body></html>"#;
        assert_eq!(extract_email_from_html(html), None);
    }

    #[test]
    fn encoded_at_sign_in_text_is_decoded() {
        let html = "<body>hello&#64;bakery.example</body>";
        assert_eq!(extract_email_from_html(html).as_deref(), Some("hello@bakery.example"));
    }

    #[test]
    fn tags_split_adjacent_words() {
        let html = "<body><span>call</span><span>info@acme.example</span></body>";
        assert_eq!(extract_email_from_html(html).as_deref(), Some("info@acme.example"));
    }

    #[test]
    fn nothing_scrapeable_is_none() {
        assert_eq!(extract_email_from_html("<html><body><h1>Acme</h1></body></html>"), None);
    }
}
