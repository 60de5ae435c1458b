use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::model::ticket::TicketStatus;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_status(status: TicketStatus) -> String {
    status.label()
}

/// Render a backend timestamp in local time. Unparseable input is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    format_timestamp_in(raw, &Local)
}

pub fn format_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(raw) {
        Some(utc) => utc.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

// Naive timestamps (no offset) are what the backend emits for UTC datetimes.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `1 ticket`, `3 tickets`.
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Keep at most `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
