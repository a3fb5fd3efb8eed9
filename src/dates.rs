//! Date resolution for heterogeneous feed timestamps.
//!
//! Feeds disagree about how to write a date. This module turns whatever a
//! record carries into a comparable `DateTime<Utc>`, or `None` when nothing
//! parses. It never errors.
//!
//! # Resolution order
//!
//! Text values are first normalized: a whitespace-delimited `at` becomes a
//! single space (`"Sep 9, 2025 at 4:04 PM"` → `"Sep 9, 2025 4:04 PM"`) and
//! runs of whitespace collapse. Then, stopping at the first success:
//!
//! 1. machine formats: RFC 3339, RFC 2822, ISO-like date-times, ISO dates,
//!    bare epoch digits
//! 2. the human-format table ([`HUMAN_DATETIME_FORMATS`], [`HUMAN_DATE_FORMATS`])
//! 3. both again with ordinal suffixes removed (`"Sep 1st"` → `"Sep 1"`)
//!
//! Values without an offset are interpreted in the caller's timezone; ISO
//! date-only values (`2025-09-10`) are UTC midnight.

use crate::models::RawDate;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static AT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+at\s+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("valid regex"));
/// `" (Mountain Standard Time)"` as appended by browsers' `Date.toString`.
static ZONE_NAME_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^()]*\)$").expect("valid regex"));

/// Epoch values at or above this magnitude are read as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

const ISO_OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

// `Tue Sep 09 2025 16:04:00 GMT-0700`
const BROWSER_FORMATS: &[&str] = &["%a %b %d %Y %H:%M:%S GMT%z", "%a %b %d %Y %H:%M:%S UTC%z"];

const ISO_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Human-style date-times, tried in order. `%B` also accepts abbreviated
/// month names and `%A` abbreviated weekdays when parsing.
pub const HUMAN_DATETIME_FORMATS: &[&str] = &[
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y, %I:%M %p",
    "%B %d %Y %I:%M %p",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y, %I:%M:%S %p",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%A, %B %d, %Y %I:%M %p",
    "%A, %B %d, %Y, %I:%M %p",
    "%A %B %d %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Human-style dates without a time of day; resolved to local midnight.
pub const HUMAN_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%A, %B %d, %Y",
    "%d %B %Y",
    "%m/%d/%Y",
];

/// Resolve a raw date value, reading zone-less values as local time.
pub fn resolve_date(raw: Option<&RawDate>) -> Option<DateTime<Utc>> {
    resolve_date_in(raw, &Local)
}

/// Resolve a raw date value, reading zone-less values in `tz`.
pub fn resolve_date_in<Tz: TimeZone>(raw: Option<&RawDate>, tz: &Tz) -> Option<DateTime<Utc>> {
    match raw? {
        RawDate::Epoch(value) => from_epoch(*value),
        RawDate::EpochFloat(value) => from_epoch_float(*value),
        RawDate::Instant(dt) => Some(dt.with_timezone(&Utc)),
        RawDate::Text(text) => parse_text(text, tz),
        RawDate::Other(_) => None,
    }
}

fn parse_text<Tz: TimeZone>(text: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return None;
    }

    parse_normalized(&normalized, tz).or_else(|| {
        let stripped = ORDINAL_SUFFIX.replace_all(&normalized, "${1}");
        if stripped == normalized {
            None
        } else {
            parse_normalized(&stripped, tz)
        }
    })
}

/// Replace `" at "` with a space and collapse whitespace.
fn normalize_text(text: &str) -> String {
    let without_at = AT_WORD.replace_all(text, " ");
    WHITESPACE.replace_all(without_at.trim(), " ").into_owned()
}

fn parse_normalized<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    parse_machine(s, tz).or_else(|| parse_human(s, tz))
}

fn parse_machine<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = ISO_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    let without_zone_name = ZONE_NAME_SUFFIX.replace(s, "");
    if let Some(dt) = BROWSER_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&without_zone_name, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = ISO_NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return in_zone(naive, tz);
    }
    if let Ok(day) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if !s.is_empty() && s.len() <= 13 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(from_epoch);
    }
    None
}

fn parse_human<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Some(naive) = HUMAN_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return in_zone(naive, tz);
    }
    HUMAN_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|naive| in_zone(naive, tz))
}

// DST gaps have no local mapping; ambiguous times take the earlier instant.
fn in_zone<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD.unsigned_abs() {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn from_epoch_float(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    let millis = if value.abs() >= EPOCH_MILLIS_THRESHOLD as f64 {
        value
    } else {
        value * 1000.0
    };
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}
