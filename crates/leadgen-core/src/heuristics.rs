//! Tunable name heuristics: the corporate denylist and the keyword groups
//! that feed the name-quality score.
//!
//! Defaults are compiled in. A YAML file can replace either list:
//!
//! ```yaml
//! corporate_indicators: [corporation, corp, llc, walmart]
//! keyword_groups:
//!   - name: professional
//!     points: 10
//!     keywords: [professional, expert, premium]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Generic corporate suffixes followed by well-known national chains.
pub const DEFAULT_CORPORATE_INDICATORS: &[&str] = &[
    "corporation",
    "corp",
    "inc",
    "llc",
    "ltd",
    "limited",
    "walmart",
    "target",
    "home depot",
    "lowes",
    "costco",
    "mcdonalds",
    "burger king",
    "subway",
    "starbucks",
    "cvs",
    "walgreens",
    "rite aid",
    "publix",
    "kroger",
    "bank of america",
    "wells fargo",
    "chase",
    "citibank",
    "at&t",
    "verizon",
    "t-mobile",
    "sprint",
];

/// Upper bound for a single keyword group's points.
pub const MAX_GROUP_POINTS: u8 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub points: u8,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    fn new(name: &str, points: u8, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            points,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// `true` when `lowered_name` contains any of the group's keywords.
    #[must_use]
    pub fn matches(&self, lowered_name: &str) -> bool {
        self.keywords.iter().any(|k| lowered_name.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heuristics {
    #[serde(default = "default_corporate_indicators")]
    pub corporate_indicators: Vec<String>,
    #[serde(default = "default_keyword_groups")]
    pub keyword_groups: Vec<KeywordGroup>,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            corporate_indicators: default_corporate_indicators(),
            keyword_groups: default_keyword_groups(),
        }
    }
}

impl Heuristics {
    /// Returns the first corporate indicator contained in `lowered_name`.
    #[must_use]
    pub fn corporate_match(&self, lowered_name: &str) -> Option<&str> {
        self.corporate_indicators
            .iter()
            .map(String::as_str)
            .find(|indicator| lowered_name.contains(indicator))
    }

    /// Lowercases every indicator and keyword so matching against a
    /// lowercased name is consistent regardless of how the file was written.
    fn lowercased(mut self) -> Self {
        for indicator in &mut self.corporate_indicators {
            *indicator = indicator.trim().to_lowercase();
        }
        for group in &mut self.keyword_groups {
            for keyword in &mut group.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        self
    }
}

fn default_corporate_indicators() -> Vec<String> {
    DEFAULT_CORPORATE_INDICATORS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_keyword_groups() -> Vec<KeywordGroup> {
    vec![
        KeywordGroup::new("professional", 10, &["professional", "expert", "premium"]),
        KeywordGroup::new("availability", 8, &["emergency", "24/7", "24 hour"]),
        KeywordGroup::new("local", 5, &["local", "family", "custom"]),
        KeywordGroup::new(
            "family_business",
            5,
            &["& sons", "& daughter", "brothers", "sisters"],
        ),
    ]
}

/// Load and validate heuristics from a YAML file.
///
/// Lists omitted from the file fall back to the compiled-in defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_heuristics(path: &Path) -> Result<Heuristics, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::HeuristicsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_heuristics(&content)
}

/// Parse and validate heuristics from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_heuristics(content: &str) -> Result<Heuristics, ConfigError> {
    let heuristics: Heuristics = serde_yaml::from_str(content)?;
    let heuristics = heuristics.lowercased();
    validate_heuristics(&heuristics)?;
    Ok(heuristics)
}

fn validate_heuristics(heuristics: &Heuristics) -> Result<(), ConfigError> {
    if heuristics.corporate_indicators.iter().any(String::is_empty) {
        return Err(ConfigError::Validation(
            "corporate indicators must be non-empty strings".to_string(),
        ));
    }

    let mut seen_groups = HashSet::new();
    for group in &heuristics.keyword_groups {
        if !seen_groups.insert(group.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate keyword group: '{}'",
                group.name
            )));
        }
        if group.keywords.is_empty() || group.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "keyword group '{}' needs at least one non-empty keyword",
                group.name
            )));
        }
        if group.points == 0 || group.points > MAX_GROUP_POINTS {
            return Err(ConfigError::Validation(format!(
                "keyword group '{}' has invalid points {}; must be 1..={MAX_GROUP_POINTS}",
                group.name, group.points
            )));
        }
    }

    Ok(())
}
