//! Snapshot loading from a local file or a URL.
//!
//! A snapshot is `items.json` as written by the collector, or any JSON that
//! is either a bare array of records or an object with an `items` array.
//!
//! Remote loads append a `ts=<unix seconds>` query parameter and send
//! `Cache-Control: no-store` so static hosts never serve a stale copy.
//! A failed load is never fatal to the viewer: [`load_or_empty`] logs the
//! failure and hands back an empty snapshot.

use crate::error::Result;
use crate::models::{Snapshot, SnapshotPayload};
use crate::utils::truncate_for_log;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::CACHE_CONTROL;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use url::Url;

/// Where a snapshot lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Path(PathBuf),
    Url(Url),
}

impl Location {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(raw: &str) -> Result<Self> {
        let lowered = raw.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Ok(Location::Url(Url::parse(raw)?))
        } else {
            Ok(Location::Path(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Parse a snapshot body in either accepted shape.
pub fn parse_snapshot(body: &str) -> Result<Snapshot> {
    let payload: SnapshotPayload = serde_json::from_str(body)?;
    Ok(payload.into())
}

/// Add the `ts` cache-busting parameter, replacing any previous one.
pub fn cache_busted(url: &Url, now: DateTime<Utc>) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "ts")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut busted = url.clone();
    busted
        .query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("ts", &now.timestamp().to_string());
    busted
}

/// Load a snapshot, propagating every failure.
#[instrument(level = "info", skip_all, fields(%location))]
pub async fn load_snapshot(client: &Client, location: &Location) -> Result<Snapshot> {
    let body = match location {
        Location::Path(path) => tokio::fs::read_to_string(path).await?,
        Location::Url(url) => {
            let url = cache_busted(url, Utc::now());
            debug!(%url, "Fetching snapshot");
            client
                .get(url)
                .header(CACHE_CONTROL, "no-store")
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?
        }
    };

    let snapshot = parse_snapshot(&body).inspect_err(|e| {
        debug!(error = %e, body = %truncate_for_log(&body, 300), "Snapshot body did not parse");
    })?;
    info!(records = snapshot.records.len(), "Loaded snapshot");
    Ok(snapshot)
}

/// Load a snapshot, substituting an empty one on any failure.
pub async fn load_or_empty(client: &Client, location: &Location) -> Snapshot {
    match load_snapshot(client, location).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(%location, error = %e, "Snapshot load failed; showing no items");
            Snapshot::default()
        }
    }
}

/// Holds the snapshot currently on display.
///
/// There is one writer. [`SnapshotStore::replace`] swaps the whole
/// collection; readers keep whatever `Arc` they already cloned.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: Arc<Snapshot>,
}

impl SnapshotStore {
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Install `next` and return the snapshot it replaced.
    pub fn replace(&mut self, next: Snapshot) -> Arc<Snapshot> {
        std::mem::replace(&mut self.current, Arc::new(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleRecord;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_location_parse() {
        assert!(matches!(
            Location::parse("https://example.github.io/items.json").unwrap(),
            Location::Url(_)
        ));
        assert_eq!(
            Location::parse("site/items.json").unwrap(),
            Location::Path(PathBuf::from("site/items.json"))
        );
        assert!(Location::parse("https://").is_err());
    }

    #[test]
    fn test_cache_busted_appends_seconds() {
        let now = Utc.with_ymd_and_hms(2025, 9, 10, 10, 0, 0).unwrap();
        let url = Url::parse("https://example.com/items.json?v=2&ts=1").unwrap();
        let busted = cache_busted(&url, now);
        assert_eq!(busted.as_str(), "https://example.com/items.json?v=2&ts=1757498400");
    }

    #[test]
    fn test_parse_snapshot_shapes() {
        assert_eq!(parse_snapshot("[]").unwrap().records.len(), 0);
        assert_eq!(parse_snapshot(r#"{"items": [{"title": "a"}]}"#).unwrap().records.len(), 1);
        assert!(parse_snapshot("not json").is_err());
        assert!(parse_snapshot("42").is_err());
    }

    #[test]
    fn test_one_bad_record_keeps_the_rest() {
        let bare = parse_snapshot(
            r#"[{"title":"good","isoDate":"2025-09-10T10:00:00Z"},{"title":"bad","date":true}]"#,
        )
        .unwrap();
        assert_eq!(bare.records.len(), 2);
        assert_eq!(bare.records[1].display_title(), "bad");
        assert_eq!(crate::dates::resolve_date(bare.records[1].date_value()), None);

        let doc = parse_snapshot(r#"{"items": [{"title": "good"}, {"title": 7}, 3]}"#).unwrap();
        let titles: Vec<_> = doc.records.iter().map(|r| r.display_title()).collect();
        assert_eq!(titles, vec!["good", "7"]);

        assert!(parse_snapshot(r#"{"items": null}"#).unwrap().records.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"team": "Arizona Cardinals", "items": [{{"title": "Kickoff", "isoDate": "2025-09-10T10:00:00Z"}}]}}"#
        )
        .unwrap();

        let location = Location::Path(file.path().to_path_buf());
        let snapshot = load_snapshot(&Client::new(), &location).await.unwrap();
        assert_eq!(snapshot.team.as_deref(), Some("Arizona Cardinals"));
        assert_eq!(snapshot.records[0].display_title(), "Kickoff");
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let location = Location::Path(dir.path().join("missing.json"));
        assert!(load_snapshot(&Client::new(), &location).await.is_err());
        let snapshot = load_or_empty(&Client::new(), &location).await;
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_degrades_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ truncated").unwrap();
        let location = Location::Path(file.path().to_path_buf());
        assert_eq!(load_or_empty(&Client::new(), &location).await, Snapshot::default());
    }

    #[test]
    fn test_store_replaces_wholesale() {
        let mut store = SnapshotStore::default();
        let first = Snapshot {
            records: vec![ArticleRecord::default(); 3],
            ..Snapshot::default()
        };
        store.replace(first);
        let held = store.current();

        let previous = store.replace(Snapshot::default());
        assert_eq!(previous.records.len(), 3);
        assert_eq!(held.records.len(), 3);
        assert!(store.current().records.is_empty());
    }
}
