//! Per-entry cleanup and the team relevance check.

use crate::config::RelevanceRules;
use crate::utils::collapse_whitespace;
use scraper::Html;
use url::Url;

/// Query parameters that only track clicks.
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "mc_cid", "mc_eid"];

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_lowercase();
    key.starts_with("utm") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Drop tracking parameters and the fragment. Unparseable links are returned as-is.
pub fn clean_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !is_tracking_param(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.set_fragment(None);
    url.to_string()
}

/// Lowercase host without a leading `www.`, or `""` when there is none.
pub fn link_domain(raw: &str) -> String {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(str::to_lowercase))
        .map(|host| host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
        .unwrap_or_default()
}

/// Title form used for duplicate detection.
pub fn norm_title(title: &str) -> String {
    collapse_whitespace(title).to_lowercase()
}

/// Visible text of an HTML fragment, whitespace collapsed.
pub fn html_to_text(fragment: &str) -> String {
    if !fragment.contains('<') {
        return collapse_whitespace(fragment);
    }
    let html = Html::parse_fragment(fragment);
    collapse_whitespace(&html.root_element().text().collect::<Vec<_>>().join(" "))
}

impl RelevanceRules {
    /// Decide whether an entry belongs in the team feed.
    ///
    /// Blocked phrases always reject. Trusted feeds and trusted domains are
    /// kept. Everything else needs a keyword in the title or summary.
    pub fn allows(&self, title: &str, summary: &str, domain: &str, trusted: bool) -> bool {
        let text = format!("{title} {summary}").to_lowercase();
        if self.blocked.iter().any(|b| text.contains(b.as_str())) {
            return false;
        }
        if trusted || self.trusted_domains.iter().any(|d| d == domain) {
            return true;
        }
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
