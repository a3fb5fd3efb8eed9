//! RSS 2.0 and Atom parsing into a flat list of [`FeedEntry`] values.
//!
//! Both formats are read through `quick-xml`'s serde support. Only the
//! handful of elements the collector needs are modelled; everything else in
//! the document is skipped.

use crate::error::Result;
use serde::Deserialize;

/// The parts of a feed entry the collector looks at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Raw summary, possibly containing HTML.
    pub summary: String,
    pub published: Option<String>,
    pub updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: Option<RssChannel>,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "dc:date")]
    dc_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<AtomText>,
    content: Option<AtomText>,
    published: Option<String>,
    updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl From<RssItem> for FeedEntry {
    fn from(item: RssItem) -> Self {
        FeedEntry {
            title: item.title.unwrap_or_default(),
            link: item.link.unwrap_or_default(),
            summary: item.description.unwrap_or_default(),
            published: item.pub_date,
            updated: item.dc_date,
        }
    }
}

impl From<AtomEntry> for FeedEntry {
    fn from(entry: AtomEntry) -> Self {
        // rel defaults to "alternate" in Atom.
        let link = entry
            .links
            .iter()
            .find(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
            .or_else(|| entry.links.first())
            .and_then(|l| l.href.clone())
            .unwrap_or_default();
        FeedEntry {
            title: entry.title.map(|t| t.value).unwrap_or_default(),
            link,
            summary: entry
                .summary
                .or(entry.content)
                .map(|t| t.value)
                .unwrap_or_default(),
            published: entry.published,
            updated: entry.updated,
        }
    }
}

/// Parse an RSS or Atom document.
///
/// A document that is well-formed but neither RSS nor Atom yields no entries.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let rss: RssDocument = quick_xml::de::from_str(xml)?;
    if let Some(channel) = rss.channel {
        return Ok(channel.items.into_iter().map(FeedEntry::from).collect());
    }
    let atom: AtomFeed = quick_xml::de::from_str(xml)?;
    Ok(atom.entries.into_iter().map(FeedEntry::from).collect())
}
