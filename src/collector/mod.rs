//! Feed collection: fetch every configured feed and build a snapshot.
//!
//! The pipeline per run:
//! 1. **Fetch**: download all feeds (a few at a time). A feed that fails to
//!    download or parse contributes nothing.
//! 2. **Clean**: collapse titles, strip tracking parameters, derive domains.
//! 3. **Filter**: apply the [`RelevanceRules`](crate::config::RelevanceRules).
//! 4. **Dedupe**: normalized title plus cleaned link.
//! 5. **Rank**: newest first, capped at [`MAX_ITEMS`].
//!
//! The result is a [`FeedDocument`] written as pretty JSON (`items.json`).

pub mod parse;
pub mod relevance;

use crate::config::{Config, FeedSpec};
use crate::dates::resolve_date;
use crate::error::Result;
use crate::models::{ArticleRecord, FeedDocument, RawDate};
use crate::ranker::MAX_ITEMS;
use crate::utils::{collapse_whitespace, write_output};
use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use parse::{FeedEntry, parse_feed};
use relevance::{clean_url, html_to_text, link_domain, norm_title};
use reqwest::Client;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// An entry that passed cleanup and the relevance check.
#[derive(Debug, Clone)]
struct Candidate {
    key: String,
    published: DateTime<Utc>,
    record: ArticleRecord,
}

/// Download and parse one feed.
#[instrument(level = "info", skip_all, fields(feed = %feed.name))]
pub async fn fetch_feed(client: &Client, feed: &FeedSpec) -> Result<Vec<FeedEntry>> {
    let body = client
        .get(&feed.url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let entries = parse_feed(&body)?;
    debug!(count = entries.len(), "Parsed feed entries");
    Ok(entries)
}

/// Fetch every configured feed and build the snapshot document.
#[instrument(level = "info", skip_all, fields(team = %config.team))]
pub async fn collect(client: &Client, config: &Config) -> FeedDocument {
    let fetched: Vec<(&FeedSpec, Vec<FeedEntry>)> = stream::iter(config.feeds.iter())
        .map(|feed| async move {
            match fetch_feed(client, feed).await {
                Ok(entries) => {
                    info!(feed = %feed.name, count = entries.len(), "Fetched feed");
                    (feed, entries)
                }
                Err(e) => {
                    warn!(feed = %feed.name, url = %feed.url, error = %e, "Feed fetch failed; skipping");
                    (feed, Vec::new())
                }
            }
        })
        .buffered(config.fetch_concurrency.max(1))
        .collect()
        .await;

    build_document(config, &fetched, Utc::now())
}

/// Turn fetched entries into the snapshot document. `now` stamps the
/// document and stands in for entries with no usable date.
pub fn build_document(
    config: &Config,
    fetched: &[(&FeedSpec, Vec<FeedEntry>)],
    now: DateTime<Utc>,
) -> FeedDocument {
    let total: usize = fetched.iter().map(|(_, entries)| entries.len()).sum();

    let items: Vec<ArticleRecord> = fetched
        .iter()
        .flat_map(|(feed, entries)| entries.iter().filter_map(move |e| candidate(config, feed, e, now)))
        .unique_by(|c| c.key.clone())
        .sorted_by(|a, b| b.published.cmp(&a.published))
        .take(MAX_ITEMS)
        .map(|c| c.record)
        .collect();

    let sources: Vec<String> = items
        .iter()
        .filter_map(|r| r.source.clone())
        .unique()
        .sorted()
        .collect();

    info!(
        entries = total,
        kept = items.len(),
        sources = sources.len(),
        "Built feed document"
    );

    FeedDocument {
        team: Some(config.team.clone()),
        updated_at: Some(now.to_rfc3339()),
        items,
        sources,
        links: config.links.clone(),
    }
}

fn candidate(config: &Config, feed: &FeedSpec, entry: &FeedEntry, now: DateTime<Utc>) -> Option<Candidate> {
    let title = collapse_whitespace(&entry.title);
    let link = clean_url(entry.link.trim());
    if title.is_empty() || link.is_empty() {
        return None;
    }

    let domain = link_domain(&link);
    let summary = html_to_text(&entry.summary);
    if !config.relevance.allows(&title, &summary, &domain, feed.trusted) {
        debug!(feed = %feed.name, %title, "Entry not relevant; skipping");
        return None;
    }

    let published = entry_timestamp(entry).unwrap_or(now);
    let source = if feed.trusted || domain.is_empty() {
        feed.name.clone()
    } else {
        domain
    };

    Some(Candidate {
        key: format!("{}|{}", norm_title(&title), link),
        published,
        record: ArticleRecord {
            title: Some(title),
            link: Some(link),
            source: Some(source),
            iso_date: Some(RawDate::Text(
                published.to_rfc3339_opts(SecondsFormat::Secs, true),
            )),
            published: Some(RawDate::Epoch(published.timestamp())),
            ..ArticleRecord::default()
        },
    })
}

/// Published date, else updated date.
fn entry_timestamp(entry: &FeedEntry) -> Option<DateTime<Utc>> {
    [&entry.published, &entry.updated]
        .into_iter()
        .flatten()
        .find_map(|raw| resolve_date(Some(&RawDate::from(raw.as_str()))))
}

/// Write the document as pretty JSON.
pub async fn write_document(document: &FeedDocument, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(document)?;
    write_output(path, &json).await
}
