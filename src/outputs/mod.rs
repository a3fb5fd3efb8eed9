//! Presentation of a ranked feed.
//!
//! # Submodules
//!
//! - [`text`]: terminal cards
//! - [`markdown`]: a Markdown page with cards and quick links
//! - [`json`]: the ranked view as JSON for other front ends
//!
//! Every renderer takes a [`Page`] and a timezone for formatting timestamps.
//! Missing values are shown as [`MISSING`].

pub mod json;
pub mod markdown;
pub mod text;

use crate::models::QuickLink;
use crate::ranker::RankedFeed;
use crate::sources::SourceFilter;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

/// Placeholder for an unknown timestamp or source.
pub const MISSING: &str = "—";

const WHEN_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Everything a renderer needs for one view.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub team: Option<&'a str>,
    pub filter: &'a SourceFilter,
    pub feed: &'a RankedFeed<'a>,
    pub links: &'a [QuickLink],
}

/// Concise timestamp in `tz`, such as `Sep 9, 2025, 4:04 PM`.
pub fn format_when_in<Tz>(when: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match when {
        Some(dt) => dt.with_timezone(tz).format(WHEN_FORMAT).to_string(),
        None => MISSING.to_string(),
    }
}

/// Raw source label for display, or [`MISSING`].
pub fn display_source(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => MISSING,
    }
}
