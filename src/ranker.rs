//! The feed ranker: filter, order newest-first, cap, summarize.
//!
//! Ranking is a pure function of the snapshot passed in, the source filter
//! and the ranker's catalog. Changing the filter re-runs [`FeedRanker::rank`]
//! over the same snapshot; nothing is re-fetched.
//!
//! # Ordering
//!
//! Items sort by resolved timestamp, newest first. Unresolved timestamps
//! (`None`) compare below every resolved one and therefore sort last. The
//! sort is stable, so equal timestamps (including two unresolved ones) keep
//! their snapshot order.

use crate::dates::resolve_date_in;
use crate::models::ArticleRecord;
use crate::sources::{SourceCatalog, SourceFilter};
use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

/// Maximum number of items kept after sorting.
pub const MAX_ITEMS: usize = 50;

/// A record paired with its canonical source and resolved timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArticle<'a> {
    pub record: &'a ArticleRecord,
    pub canonical_source: String,
    pub published: Option<DateTime<Utc>>,
}

/// The ranked view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedFeed<'a> {
    pub items: Vec<ResolvedArticle<'a>>,
    /// Timestamp of the newest resolved item, `None` when no item resolves.
    pub newest: Option<DateTime<Utc>>,
}

impl RankedFeed<'_> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ranks snapshots against a source catalog. Zone-less dates are read in `tz`.
#[derive(Debug, Clone)]
pub struct FeedRanker<Tz: TimeZone> {
    catalog: SourceCatalog,
    tz: Tz,
}

impl<Tz: TimeZone> FeedRanker<Tz> {
    pub fn new(catalog: SourceCatalog, tz: Tz) -> Self {
        Self { catalog, tz }
    }

    /// Resolve one record's canonical source and timestamp.
    pub fn resolve<'a>(&self, record: &'a ArticleRecord) -> ResolvedArticle<'a> {
        ResolvedArticle {
            record,
            canonical_source: self.catalog.normalize(record.source_label()),
            published: resolve_date_in(record.date_value(), &self.tz),
        }
    }

    /// Filter by source, sort newest first, cap, and report the newest timestamp.
    pub fn rank<'a>(&self, records: &'a [ArticleRecord], filter: &SourceFilter) -> RankedFeed<'a> {
        let mut items: Vec<ResolvedArticle<'a>> = records
            .iter()
            .map(|record| self.resolve(record))
            .filter(|article| filter.matches(&article.canonical_source))
            .collect();
        let matched = items.len();

        items.sort_by(|a, b| b.published.cmp(&a.published));
        items.truncate(MAX_ITEMS);

        let newest = items.iter().find_map(|article| article.published);
        let unresolved = items.iter().filter(|a| a.published.is_none()).count();
        debug!(
            total = records.len(),
            matched,
            kept = items.len(),
            unresolved,
            filter = filter.label(),
            "Ranked feed"
        );

        RankedFeed { items, newest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawDate;
    use chrono::Duration;

    fn ranker() -> FeedRanker<Utc> {
        FeedRanker::new(SourceCatalog::default(), Utc)
    }

    fn record(title: &str, source: &str, date: Option<&str>) -> ArticleRecord {
        ArticleRecord {
            title: Some(title.to_string()),
            link: Some(format!("https://example.com/{title}")),
            source: Some(source.to_string()),
            iso_date: date.map(RawDate::from),
            ..ArticleRecord::default()
        }
    }

    fn titles<'a>(feed: &'a RankedFeed<'_>) -> Vec<&'a str> {
        feed.items.iter().map(|a| a.record.display_title()).collect()
    }

    #[test]
    fn test_mixed_formats_order_newest_first() {
        let records = vec![
            record("undated", "espn.com", None),
            record("sep9", "espn.com", Some("Sep 9, 2025 at 4:04 PM")),
            record("sep10", "espn.com", Some("2025-09-10T10:00:00Z")),
        ];
        let feed = ranker().rank(&records, &SourceFilter::All);

        assert_eq!(titles(&feed), vec!["sep10", "sep9", "undated"]);
        let expected = DateTime::parse_from_rfc3339("2025-09-10T10:00:00Z").unwrap();
        assert_eq!(feed.newest, Some(expected.with_timezone(&Utc)));
    }

    #[test]
    fn test_cap_keeps_fifty_most_recent() {
        let base = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let records: Vec<ArticleRecord> = (0..60)
            .map(|i| {
                let when = (base + Duration::hours(i)).to_rfc3339();
                record(&format!("item{i}"), "azcardinals.com", Some(&when))
            })
            .collect();

        let feed = ranker().rank(&records, &SourceFilter::All);
        assert_eq!(feed.len(), MAX_ITEMS);
        assert_eq!(feed.items[0].record.display_title(), "item59");
        assert_eq!(feed.items[49].record.display_title(), "item10");
        assert!(feed.items.windows(2).all(|w| w[0].published >= w[1].published));
    }

    #[test]
    fn test_filter_by_canonical_label() {
        let records = vec![
            record("espn", "ESPN Arizona Cardinals Blog", Some("2025-09-10T10:00:00Z")),
            record("wire", "cardswire.usatoday.com", Some("2025-09-11T10:00:00Z")),
        ];
        let filter = SourceFilter::from_pick(Some("ESPN — Cardinals"));
        let feed = ranker().rank(&records, &filter);

        assert_eq!(titles(&feed), vec!["espn"]);
        assert_eq!(feed.items[0].canonical_source, "ESPN — Cardinals");
    }

    #[test]
    fn test_filter_ignores_case() {
        let records = vec![record("wire", "Cards Wire", Some("2025-09-11T10:00:00Z"))];
        let feed = ranker().rank(&records, &SourceFilter::from_pick(Some("CARDS WIRE")));
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let records = vec![
            record("a", "espn.com", Some("2025-09-10T10:00:00Z")),
            record("b", "some blog", None),
            record("c", "", Some("2025-09-09T10:00:00Z")),
        ];
        let feed = ranker().rank(&records, &SourceFilter::from_pick(Some(crate::sources::ALL_SOURCES)));
        assert_eq!(titles(&feed), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let feed = ranker().rank(&[], &SourceFilter::All);
        assert!(feed.is_empty());
        assert_eq!(feed.newest, None);
    }

    #[test]
    fn test_all_unresolved_has_no_newest() {
        let records = vec![
            record("x", "espn.com", Some("not a date")),
            record("y", "espn.com", None),
        ];
        let feed = ranker().rank(&records, &SourceFilter::All);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.newest, None);
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        let records = vec![
            record("first", "espn.com", Some("2025-09-10T10:00:00Z")),
            record("u1", "espn.com", None),
            record("second", "espn.com", Some("Wed, 10 Sep 2025 10:00:00 GMT")),
            record("u2", "espn.com", None),
        ];
        let feed = ranker().rank(&records, &SourceFilter::All);
        assert_eq!(titles(&feed), vec!["first", "second", "u1", "u2"]);
    }

    #[test]
    fn test_unresolved_after_resolved_even_when_old() {
        let records = vec![
            record("undated", "espn.com", None),
            record("ancient", "espn.com", Some("1970-01-02T00:00:00Z")),
        ];
        let feed = ranker().rank(&records, &SourceFilter::All);
        assert_eq!(titles(&feed), vec!["ancient", "undated"]);
    }

    #[test]
    fn test_fewer_matches_than_cap_keeps_all() {
        let records: Vec<ArticleRecord> = (0..5).map(|i| record(&format!("{i}"), "x", None)).collect();
        let feed = ranker().rank(&records, &SourceFilter::All);
        assert_eq!(feed.len(), 5);
    }

    #[test]
    fn test_cap_applies_after_filter() {
        let base = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let records: Vec<ArticleRecord> = (0..120)
            .map(|i| {
                let source = if i % 2 == 0 { "espn.com" } else { "cardswire.usatoday.com" };
                let when = (base + Duration::minutes(i)).to_rfc3339();
                record(&format!("item{i}"), source, Some(&when))
            })
            .collect();

        let feed = ranker().rank(&records, &SourceFilter::from_pick(Some("Cards Wire")));
        assert_eq!(feed.len(), MAX_ITEMS);
        assert!(feed.items.iter().all(|a| a.canonical_source == "Cards Wire"));
        assert_eq!(feed.items[0].record.display_title(), "item119");
    }

    #[test]
    fn test_rank_does_not_touch_input() {
        let records = vec![
            record("old", "espn.com", Some("2025-09-01T00:00:00Z")),
            record("new", "espn.com", Some("2025-09-02T00:00:00Z")),
        ];
        let before = records.clone();
        let _ = ranker().rank(&records, &SourceFilter::All);
        assert_eq!(records, before);
    }
}
