//! Email resolution strategies. Each returns found or not-found; the engine
//! runs them in the configured order and stops at the first hit.

use std::sync::LazyLock;

use leadgen_core::EmailSource;
use regex::Regex;
use reqwest::Url;

pub(crate) static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStrategy {
    /// Editorial summary, then up to five reviews.
    ProviderText,
    /// Homepage `mailto:` link, then visible text.
    WebsiteScrape,
    /// `info@<domain>`.
    DomainGuess,
}

impl EmailStrategy {
    pub const DEFAULT_ORDER: [EmailStrategy; 3] = [
        EmailStrategy::ProviderText,
        EmailStrategy::WebsiteScrape,
        EmailStrategy::DomainGuess,
    ];

    #[must_use]
    pub fn source(self) -> EmailSource {
        match self {
            EmailStrategy::ProviderText => EmailSource::ProviderText,
            EmailStrategy::WebsiteScrape => EmailSource::WebsiteScrape,
            EmailStrategy::DomainGuess => EmailSource::DomainGuess,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailLookup {
    Found(String),
    NotFound,
}

impl From<Option<String>> for EmailLookup {
    fn from(value: Option<String>) -> Self {
        value.map_or(EmailLookup::NotFound, EmailLookup::Found)
    }
}

/// First email-shaped substring of `text`.
#[must_use]
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}

/// Scans each text in order and returns the first email found.
pub fn email_from_free_text<'a>(texts: impl IntoIterator<Item = &'a str>) -> EmailLookup {
    texts
        .into_iter()
        .find_map(find_email)
        .map(str::to_owned)
        .into()
}

/// `info@<host>` with a leading `www.` removed. Not-found for unparseable
/// URLs and IP hosts.
#[must_use]
pub fn guess_from_website(website: &str) -> EmailLookup {
    let Ok(url) = Url::parse(website.trim()) else {
        return EmailLookup::NotFound;
    };
    let Some(domain) = url.domain() else {
        return EmailLookup::NotFound;
    };
    let domain = domain.strip_prefix("www.").unwrap_or(domain);
    if domain.is_empty() || !domain.contains('.') {
        return EmailLookup::NotFound;
    }
    EmailLookup::Found(format!("info@{domain}"))
}
