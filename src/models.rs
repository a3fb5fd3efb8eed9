//! Data models for feed snapshots and the records inside them.
//!
//! - [`ArticleRecord`]: one raw item as produced by the collector or any other
//!   snapshot writer. Every field is optional; the core never rejects a record.
//! - [`RawDate`]: a loosely-typed date value (epoch number, structured
//!   timestamp or free text).
//! - [`FeedDocument`]: the object form of `items.json` written by the collector.
//! - [`Snapshot`]: the immutable collection the viewer ranks and renders.
//!
//! Field names follow the JSON keys used by feed readers (`isoDate`,
//! `pubDate`), hence the serde renames.
//!
//! Deserialization is lenient at the record level: a field of the wrong type
//! degrades to "absent" (or [`RawDate::Other`]), and an entry that is not an
//! object at all is skipped with a warning. One bad record never costs the
//! rest of the snapshot.

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Title shown for records that carry none.
pub const UNTITLED: &str = "Untitled";

/// A date value as found in a snapshot.
///
/// Variants are tried in declaration order when deserializing, so RFC 3339
/// strings land in [`RawDate::Instant`] and everything else in
/// [`RawDate::Text`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Unix epoch in seconds (or milliseconds, see [`crate::dates`]).
    Epoch(i64),
    /// Fractional Unix epoch.
    EpochFloat(f64),
    /// Already a structured point in time.
    Instant(DateTime<FixedOffset>),
    /// Anything textual: RFC 2822, ISO-like, or "Sep 9, 2025 at 4:04 PM".
    Text(String),
    /// Booleans, arrays, objects. Kept so the record survives; never resolves.
    Other(Value),
}

impl RawDate {
    /// Blank text counts as an absent value.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawDate::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for RawDate {
    fn from(value: &str) -> Self {
        RawDate::Text(value.to_string())
    }
}

/// One article item as supplied by the loader.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "isoDate", default, skip_serializing_if = "Option::is_none")]
    pub iso_date: Option<RawDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<RawDate>,
    #[serde(rename = "pubDate", default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<RawDate>,
    /// Epoch seconds written by the collector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<RawDate>,
}

impl ArticleRecord {
    /// The date value used for ordering: the first present, non-blank field
    /// among `isoDate`, `date`, `pubDate` and `published`.
    ///
    /// Later fields are never consulted once an earlier one is chosen, even
    /// if the chosen value turns out to be unparseable.
    pub fn date_value(&self) -> Option<&RawDate> {
        [&self.iso_date, &self.date, &self.pub_date, &self.published]
            .into_iter()
            .flatten()
            .find(|d| !d.is_blank())
    }

    /// Title for display, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => UNTITLED,
        }
    }

    pub fn source_label(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }
}

/// A fixed navigation link carried alongside the items.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuickLink {
    pub label: String,
    pub url: String,
}

/// The object form of a snapshot, as written by the collector.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FeedDocument {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Vec<ArticleRecord>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub sources: Vec<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub links: Vec<QuickLink>,
}

/// Either shape a loader may hand back: a bare array or a wrapping object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SnapshotPayload {
    Bare(#[serde(deserialize_with = "record_array")] Vec<ArticleRecord>),
    Document(FeedDocument),
}

/// Strings as-is, numbers and booleans as their text, anything else absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// A list whose unreadable entries are skipped. `null` or a non-array is empty.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(readable_entries(values)),
        _ => Ok(Vec::new()),
    }
}

/// Like [`lenient_seq`] but the value itself must be an array, so an object
/// body falls through to [`SnapshotPayload::Document`].
fn record_array<'de, D>(deserializer: D) -> Result<Vec<ArticleRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<Value>::deserialize(deserializer).map(readable_entries)
}

fn readable_entries<T: DeserializeOwned>(values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable snapshot entry");
                None
            }
        })
        .collect()
}

/// The collection currently on display. Never mutated; a reload builds a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub team: Option<String>,
    pub records: Vec<ArticleRecord>,
    pub links: Vec<QuickLink>,
}

impl From<SnapshotPayload> for Snapshot {
    fn from(payload: SnapshotPayload) -> Self {
        match payload {
            SnapshotPayload::Bare(records) => Snapshot {
                records,
                ..Snapshot::default()
            },
            SnapshotPayload::Document(doc) => Snapshot {
                team: doc.team,
                records: doc.items,
                links: doc.links,
            },
        }
    }
}
