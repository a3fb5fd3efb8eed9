//! Runtime configuration: team, feeds, relevance rules, source catalog, links.
//!
//! Everything has a built-in default (the Arizona Cardinals setup), so the
//! tool runs with no config file at all. A YAML file may override any
//! top-level section:
//!
//! ```yaml
//! team: Arizona Cardinals
//! feeds:
//!   - name: azcardinals.com
//!     url: https://www.azcardinals.com/rss
//!     trusted: true
//! sources:
//!   labels: ["ESPN — Cardinals"]
//!   rules:
//!     - { pattern: espn, label: "ESPN — Cardinals" }
//! ```

use crate::error::Result;
use crate::models::QuickLink;
use crate::sources::SourceCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Browser-like User-Agent; several outlets return nothing to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123 Safari/537.36";

/// One RSS or Atom feed to collect.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
    /// Trusted feeds skip the keyword check and keep their name as `source`.
    #[serde(default)]
    pub trusted: bool,
}

impl FeedSpec {
    fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            trusted: false,
        }
    }
}

/// Phrase lists used by the collector's relevance check. All lowercase.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RelevanceRules {
    /// Any of these in title or summary rejects the entry outright.
    pub blocked: Vec<String>,
    /// Entries linking to these domains are always kept.
    pub trusted_domains: Vec<String>,
    /// Otherwise an entry needs one of these.
    pub keywords: Vec<String>,
}

impl Default for RelevanceRules {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            blocked: strings(&[
                "st. louis cardinals",
                "st louis cardinals",
                "mlb",
                "baseball",
                "nl central",
            ]),
            trusted_domains: strings(&[
                "azcardinals.com",
                "espn.com",
                "sports.yahoo.com",
                "cardswire.usatoday.com",
                "revengeofthebirds.com",
                "azcentral.com",
                "bleacherreport.com",
                "news.google.com",
            ]),
            keywords: strings(&[
                "arizona cardinals",
                "az cardinals",
                "cardinals",
                "kyler murray",
                "marvin harrison jr",
                "trey mcbride",
                "james conner",
                "jonathan gannon",
                "paris johnson",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub team: String,
    pub user_agent: String,
    /// How many feeds are fetched at once.
    pub fetch_concurrency: usize,
    pub feeds: Vec<FeedSpec>,
    pub relevance: RelevanceRules,
    pub sources: SourceCatalog,
    pub links: Vec<QuickLink>,
}

impl Default for Config {
    fn default() -> Self {
        let link = |label: &str, url: &str| QuickLink {
            label: label.to_string(),
            url: url.to_string(),
        };
        Self {
            team: "Arizona Cardinals".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_concurrency: 4,
            feeds: vec![
                FeedSpec::new("azcardinals.com", "https://www.azcardinals.com/rss"),
                FeedSpec::new(
                    "NFL.com — Arizona Cardinals",
                    "https://www.nfl.com/feeds-rs/team/arizona-cardinals/rss.xml",
                ),
                FeedSpec::new(
                    "ESPN — Arizona Cardinals",
                    "https://www.espn.com/blog/arizona-cardinals/rss",
                ),
                FeedSpec::new(
                    "Yahoo Sports — Arizona Cardinals",
                    "https://sports.yahoo.com/nfl/teams/ari/rss/",
                ),
                FeedSpec::new(
                    "Bleacher Report — Arizona Cardinals",
                    "https://feeds.feedburner.com/ArizonaCardinals",
                ),
                FeedSpec::new("USA Today — Cards Wire", "https://cardswire.usatoday.com/feed/"),
                FeedSpec::new(
                    "ProFootballTalk — Cardinals",
                    "https://profootballtalk.nbcsports.com/team/arizona-cardinals/feed/",
                ),
                FeedSpec::new(
                    "Sports Illustrated — All Cardinals",
                    "https://www.si.com/nfl/cardinals/.rss",
                ),
                FeedSpec::new(
                    "Revenge of the Birds",
                    "https://www.revengeofthebirds.com/rss/index.xml",
                ),
                FeedSpec::new(
                    "Bing News — Arizona Cardinals",
                    "https://www.bing.com/news/search?q=%22Arizona+Cardinals%22&format=RSS",
                ),
                FeedSpec::new(
                    "Google News — Arizona Cardinals",
                    "https://news.google.com/rss/search?q=%22Arizona+Cardinals%22",
                ),
            ],
            relevance: RelevanceRules::default(),
            sources: SourceCatalog::default(),
            links: vec![
                link("Schedule", "https://www.azcardinals.com/schedule/"),
                link("Roster", "https://www.azcardinals.com/team/"),
                link("Depth Chart", "https://www.espn.com/nfl/team/depth/_/name/ari"),
                link("Injury Report", "https://www.azcardinals.com/team/injury-report/"),
                link("Tickets", "https://www.azcardinals.com/tickets/"),
                link("Team Shop", "https://shop.azcardinals.com/"),
                link("Reddit", "https://www.reddit.com/r/azcardinals/"),
                link("Bleacher Report", "https://bleacherreport.com/arizona-cardinals"),
                link("ESPN Team", "https://www.espn.com/nfl/team/_/name/ari/arizona-cardinals"),
                link("Yahoo Team", "https://sports.yahoo.com/nfl/teams/arizona/"),
                link("PFF Team Page", "https://www.pff.com/nfl/teams/arizona-cardinals"),
                link("Pro-Football-Reference", "https://www.pro-football-reference.com/teams/crd/"),
                link("NFL Power Rankings", "https://www.nfl.com/news/power-rankings"),
                link("Stats", "https://www.nfl.com/teams/arizona-cardinals/stats"),
                link("Standings", "https://www.nfl.com/standings/league/2025/REG"),
            ],
        }
    }
}

impl Config {
    /// Parse YAML and validate the source catalog.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.sources.validate()?;
        Ok(config)
    }
}

/// Load the config file at `path`, or the built-in defaults when `None`.
#[instrument(level = "info")]
pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        info!("No config file given; using built-in defaults");
        return Ok(Config::default());
    };
    let yaml = tokio::fs::read_to_string(path).await?;
    let config = Config::from_yaml(&yaml)?;
    info!(
        team = %config.team,
        feeds = config.feeds.len(),
        sources = config.sources.labels.len(),
        "Loaded configuration"
    );
    Ok(config)
}
