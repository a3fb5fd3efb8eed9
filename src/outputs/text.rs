//! Plain-text cards for the terminal.

use super::{MISSING, Page, display_source, format_when_in};
use chrono::TimeZone;
use std::fmt::{Display, Write};

/// Render a page as numbered text cards.
pub fn render_text<Tz>(page: &Page<'_>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let team = page.team.unwrap_or("Team");
    writeln!(out, "{team} news · {}", page.filter.label()).unwrap();
    writeln!(out, "Updated: {}", format_when_in(page.feed.newest, tz)).unwrap();
    writeln!(out).unwrap();

    if page.feed.is_empty() {
        writeln!(out, "No items.").unwrap();
        return out;
    }

    for (i, article) in page.feed.items.iter().enumerate() {
        let record = article.record;
        writeln!(out, "{:>2}. {}", i + 1, record.display_title()).unwrap();
        writeln!(
            out,
            "    {} • {}",
            display_source(record.source.as_deref()),
            format_when_in(article.published, tz)
        )
        .unwrap();
        writeln!(out, "    {}", record.link.as_deref().unwrap_or(MISSING)).unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, RawDate};
    use crate::ranker::FeedRanker;
    use crate::sources::{SourceCatalog, SourceFilter};
    use chrono::Utc;

    #[test]
    fn test_render_text_cards() {
        let records = vec![
            ArticleRecord {
                title: Some("Kickoff".to_string()),
                link: Some("https://example.com/k".to_string()),
                source: Some("espn.com".to_string()),
                iso_date: Some(RawDate::from("2025-09-09T16:04:00Z")),
                ..ArticleRecord::default()
            },
            ArticleRecord::default(),
        ];
        let ranker = FeedRanker::new(SourceCatalog::default(), Utc);
        let feed = ranker.rank(&records, &SourceFilter::All);
        let page = Page {
            team: Some("Arizona Cardinals"),
            filter: &SourceFilter::All,
            feed: &feed,
            links: &[],
        };

        let out = render_text(&page, &Utc);
        assert!(out.starts_with("Arizona Cardinals news · All sources\nUpdated: Sep 9, 2025, 4:04 PM\n"));
        assert!(out.contains(" 1. Kickoff\n    espn.com • Sep 9, 2025, 4:04 PM\n    https://example.com/k\n"));
        assert!(out.contains(" 2. Untitled\n    — • —\n    —\n"));
    }

    #[test]
    fn test_render_text_empty() {
        let feed = Default::default();
        let page = Page {
            team: None,
            filter: &SourceFilter::All,
            feed: &feed,
            links: &[],
        };
        let out = render_text(&page, &Utc);
        assert!(out.contains("Updated: —"));
        assert!(out.ends_with("No items.\n"));
    }
}
