//! Source normalization and filtering.
//!
//! Raw `source` strings vary wildly (`"espn.com"`, `"ESPN — Arizona
//! Cardinals"`, `"ESPN Arizona Cardinals Blog"`). A [`SourceCatalog`] maps
//! them onto a small, fixed set of canonical labels with an ordered table of
//! case-insensitive substring rules. The first matching rule wins; strings
//! that match nothing pass through unchanged.
//!
//! The catalog also defines the dropdown contents: [`ALL_SOURCES`] followed
//! by the canonical labels in order.

use crate::error::{FeedError, Result};
use serde::{Deserialize, Serialize};

/// The dropdown entry meaning "no filter".
pub const ALL_SOURCES: &str = "All sources";

/// `pattern` is matched case-insensitively as a substring of the raw source.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceRule {
    pub pattern: String,
    pub label: String,
}

impl SourceRule {
    pub fn new(pattern: &str, label: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            label: label.to_string(),
        }
    }
}

/// Ordered canonical labels plus the rules that map raw strings onto them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceCatalog {
    pub labels: Vec<String>,
    pub rules: Vec<SourceRule>,
}

impl SourceCatalog {
    /// Check that the catalog is usable.
    ///
    /// Every rule needs a non-empty pattern and a label from `labels`, and
    /// every label must normalize to itself. The last condition is what makes
    /// [`SourceCatalog::normalize`] idempotent.
    pub fn validate(&self) -> Result<()> {
        for label in &self.labels {
            if label.trim().is_empty() {
                return Err(FeedError::Catalog("empty canonical label".to_string()));
            }
            if label.eq_ignore_ascii_case(ALL_SOURCES) {
                return Err(FeedError::Catalog(format!(
                    "'{label}' is reserved for the unfiltered view"
                )));
            }
        }
        for rule in &self.rules {
            if rule.pattern.trim().is_empty() {
                return Err(FeedError::Catalog(format!(
                    "rule for '{}' has an empty pattern",
                    rule.label
                )));
            }
            if !self.labels.contains(&rule.label) {
                return Err(FeedError::Catalog(format!(
                    "rule '{}' maps to unknown label '{}'",
                    rule.pattern, rule.label
                )));
            }
        }
        for label in &self.labels {
            let normalized = self.normalize(label);
            if &normalized != label {
                return Err(FeedError::Catalog(format!(
                    "label '{label}' normalizes to '{normalized}'"
                )));
            }
        }
        Ok(())
    }

    /// Map a raw source string onto its canonical label.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let lowered = raw.to_lowercase();
        self.rules
            .iter()
            .find(|rule| lowered.contains(&rule.pattern.to_lowercase()))
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| raw.to_string())
    }

    /// Dropdown entries: [`ALL_SOURCES`] then every canonical label.
    pub fn dropdown(&self) -> impl Iterator<Item = &str> {
        std::iter::once(ALL_SOURCES).chain(self.labels.iter().map(String::as_str))
    }

    /// Whether `label` is one of the canonical labels, ignoring case.
    pub fn is_known(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.to_lowercase() == label.to_lowercase())
    }
}

impl Default for SourceCatalog {
    /// The Arizona Cardinals dropdown.
    fn default() -> Self {
        const GOOGLE: &str = "Google News — Arizona Cardinals";
        const YAHOO: &str = "Yahoo Sports — Cardinals";
        const OFFICIAL: &str = "azcardinals.com";
        const ESPN: &str = "ESPN — Cardinals";
        const ARIZONA_SPORTS: &str = "Arizona Sports";
        const CARDS_WIRE: &str = "Cards Wire";
        const ROTB: &str = "Revenge of the Birds";
        const ATHLETIC: &str = "The Athletic — Cardinals";
        const PFT: &str = "ProFootballTalk — Cardinals";

        Self {
            labels: [
                GOOGLE,
                YAHOO,
                OFFICIAL,
                ESPN,
                ARIZONA_SPORTS,
                CARDS_WIRE,
                ROTB,
                ATHLETIC,
                PFT,
            ]
            .map(String::from)
            .to_vec(),
            rules: vec![
                SourceRule::new("google news", GOOGLE),
                SourceRule::new("news.google.com", GOOGLE),
                SourceRule::new("yahoo", YAHOO),
                SourceRule::new("azcardinals.com", OFFICIAL),
                SourceRule::new("espn", ESPN),
                SourceRule::new("arizona sports", ARIZONA_SPORTS),
                SourceRule::new("arizonasports.com", ARIZONA_SPORTS),
                SourceRule::new("cards wire", CARDS_WIRE),
                SourceRule::new("cardswire", CARDS_WIRE),
                SourceRule::new("revenge of the birds", ROTB),
                SourceRule::new("revengeofthebirds", ROTB),
                SourceRule::new("the athletic", ATHLETIC),
                SourceRule::new("theathletic", ATHLETIC),
                SourceRule::new("profootballtalk", PFT),
            ],
        }
    }
}

/// The source selection applied before ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceFilter {
    #[default]
    All,
    Label(String),
}

impl SourceFilter {
    /// Interpret a dropdown pick. Missing, blank or [`ALL_SOURCES`] means no filter.
    pub fn from_pick(pick: Option<&str>) -> Self {
        match pick.map(str::trim) {
            None => SourceFilter::All,
            Some(p) if p.is_empty() || p.eq_ignore_ascii_case(ALL_SOURCES) => SourceFilter::All,
            Some(p) => SourceFilter::Label(p.to_string()),
        }
    }

    /// Case-insensitive comparison against a normalized source.
    pub fn matches(&self, canonical: &str) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Label(label) => label.to_lowercase() == canonical.to_lowercase(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SourceFilter::All => ALL_SOURCES,
            SourceFilter::Label(label) => label,
        }
    }
}
