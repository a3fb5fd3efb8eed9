//! JSON rendering of the ranked view.
//!
//! The shape is what a browser front end needs to draw cards directly:
//!
//! ```text
//! {
//!   "team": "Arizona Cardinals",
//!   "filter": "All sources",
//!   "updated": "2025-09-10T10:00:00Z",
//!   "count": 1,
//!   "items": [{ "title", "link", "source", "canonical_source", "published" }]
//! }
//! ```

use super::Page;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonView<'a> {
    team: Option<&'a str>,
    filter: &'a str,
    updated: Option<String>,
    count: usize,
    items: Vec<JsonItem<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonItem<'a> {
    title: &'a str,
    link: Option<&'a str>,
    source: Option<&'a str>,
    canonical_source: &'a str,
    published: Option<String>,
}

fn iso(when: Option<DateTime<Utc>>) -> Option<String> {
    when.map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Serialize a page as pretty JSON. Timestamps are RFC 3339 in UTC, `null`
/// when unresolved.
pub fn render_json(page: &Page<'_>) -> serde_json::Result<String> {
    let view = JsonView {
        team: page.team,
        filter: page.filter.label(),
        updated: iso(page.feed.newest),
        count: page.feed.len(),
        items: page
            .feed
            .items
            .iter()
            .map(|a| JsonItem {
                title: a.record.display_title(),
                link: a.record.link.as_deref(),
                source: a.record.source.as_deref(),
                canonical_source: &a.canonical_source,
                published: iso(a.published),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&view)
}
