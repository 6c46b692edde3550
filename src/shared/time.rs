//! Timestamp rendering
//!
//! Chat messages are shown to clients in a locale-style wall-clock format in
//! the configured zone; everything else goes out as RFC 3339.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Format used for chat message timestamps (`HH:MM:SS DD/MM/YYYY`).
pub const CHAT_TIMESTAMP_FORMAT: &str = "%H:%M:%S %d/%m/%Y";

/// Render a timestamp as RFC 3339 / ISO-8601 in UTC with millisecond precision.
pub fn to_iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Render a chat timestamp in the given zone.
pub fn to_chat_local(ts: DateTime<Utc>, tz: Tz) -> String {
    ts.with_timezone(&tz).format(CHAT_TIMESTAMP_FORMAT).to_string()
}
