//! Short, localized dates for display.
//!
//! Output uses the `ja-JP` short form (`2024/01/05`), in UTC. These helpers
//! never fail: absent or unparseable input renders as an empty string.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DISPLAY_FORMAT: &str = "%Y/%m/%d";

/// Format a timestamp string as received from the CMS.
///
/// Accepts RFC 3339 (`2024-01-05T00:00:00Z`), a naive `YYYY-MM-DDTHH:MM:SS`
/// taken as UTC, or a bare `YYYY-MM-DD`.
pub fn format_date(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()).and_then(parse) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => String::new(),
    }
}

/// Format an already-parsed timestamp.
pub fn format_datetime(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.date_naive().format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
