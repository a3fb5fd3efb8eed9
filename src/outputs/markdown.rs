//! Markdown page: heading, last-updated line, one card per item, quick links.

use super::{Page, display_source, format_when_in};
use crate::utils::collapse_whitespace;
use chrono::TimeZone;
use std::fmt::{Display, Write};

fn escape_link_text(s: &str) -> String {
    collapse_whitespace(s).replace('[', "\\[").replace(']', "\\]")
}

/// Angle-bracket link destination, so spaces and parentheses survive.
fn link_target(url: &str) -> String {
    format!("<{}>", url.trim().replace('<', "%3C").replace('>', "%3E"))
}

/// Render a page as Markdown.
pub fn render_markdown<Tz>(page: &Page<'_>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut md = String::new();
    writeln!(md, "# {} News\n", page.team.unwrap_or("Team")).unwrap();
    writeln!(md, "_Source: {}_  ", page.filter.label()).unwrap();
    writeln!(md, "_Last updated: {}_\n", format_when_in(page.feed.newest, tz)).unwrap();

    for article in &page.feed.items {
        let record = article.record;
        let title = escape_link_text(record.display_title());
        match record.link.as_deref() {
            Some(link) if !link.is_empty() => {
                writeln!(md, "### [{title}]({})", link_target(link)).unwrap();
            }
            _ => {
                writeln!(md, "### {title}").unwrap();
            }
        }
        writeln!(
            md,
            "{} • {}\n",
            display_source(record.source.as_deref()),
            format_when_in(article.published, tz)
        )
        .unwrap();
    }

    if !page.links.is_empty() {
        writeln!(md, "## Quick Links\n").unwrap();
        for link in page.links {
            writeln!(md, "- [{}]({})", escape_link_text(&link.label), link_target(&link.url)).unwrap();
        }
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, QuickLink, RawDate};
    use crate::ranker::FeedRanker;
    use crate::sources::{SourceCatalog, SourceFilter};
    use chrono::Utc;

    #[test]
    fn test_render_markdown_page() {
        let records = vec![ArticleRecord {
            title: Some("Week 2 [preview]".to_string()),
            link: Some("https://example.com/p".to_string()),
            source: Some("Cards Wire".to_string()),
            pub_date: Some(RawDate::from("Sep 9, 2025 at 4:04 PM")),
            ..ArticleRecord::default()
        }];
        let ranker = FeedRanker::new(SourceCatalog::default(), Utc);
        let filter = SourceFilter::from_pick(Some("Cards Wire"));
        let feed = ranker.rank(&records, &filter);
        let links = vec![QuickLink {
            label: "Roster".to_string(),
            url: "https://www.azcardinals.com/team/".to_string(),
        }];
        let page = Page {
            team: Some("Arizona Cardinals"),
            filter: &filter,
            feed: &feed,
            links: &links,
        };

        let md = render_markdown(&page, &Utc);
        assert!(md.starts_with("# Arizona Cardinals News\n\n_Source: Cards Wire_  \n"));
        assert!(md.contains("_Last updated: Sep 9, 2025, 4:04 PM_"));
        assert!(md.contains("### [Week 2 \\[preview\\]](<https://example.com/p>)\nCards Wire • Sep 9, 2025, 4:04 PM\n"));
        assert!(md.contains("## Quick Links\n\n- [Roster](<https://www.azcardinals.com/team/>)\n"));
    }

    #[test]
    fn test_markdown_without_link_or_quick_links() {
        let records = vec![ArticleRecord::default()];
        let ranker = FeedRanker::new(SourceCatalog::default(), Utc);
        let feed = ranker.rank(&records, &SourceFilter::All);
        let page = Page {
            team: None,
            filter: &SourceFilter::All,
            feed: &feed,
            links: &[],
        };
        let md = render_markdown(&page, &Utc);
        assert!(md.contains("### Untitled\n— • —\n"));
        assert!(!md.contains("Quick Links"));
    }

    #[test]
    fn test_link_with_parens_and_spaces_stays_one_target() {
        let records = vec![ArticleRecord {
            title: Some("Depth chart".to_string()),
            link: Some("https://example.com/a (b)/c<d>".to_string()),
            ..ArticleRecord::default()
        }];
        let ranker = FeedRanker::new(SourceCatalog::default(), Utc);
        let feed = ranker.rank(&records, &SourceFilter::All);
        let page = Page {
            team: None,
            filter: &SourceFilter::All,
            feed: &feed,
            links: &[],
        };
        let md = render_markdown(&page, &Utc);
        assert!(md.contains("### [Depth chart](<https://example.com/a (b)/c%3Cd%3E>)\n"));
    }
}
