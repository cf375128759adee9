//! Time and date conversion utilities.
//!
//! Killmails and battles store their timestamps as milliseconds since the Unix epoch. These
//! helpers convert them into `chrono` dates for logging and labels.

use chrono::{DateTime, Utc};

use crate::server::error::Error;

/// Converts a millisecond Unix timestamp into a UTC date time.
///
/// # Returns
/// - `Ok(DateTime<Utc>)` - The corresponding date time
/// - `Err(Error::ParseError)` - Timestamp is outside the range `chrono` can represent
pub fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        Error::ParseError(format!(
            "Timestamp {}ms is out of range for a UTC date time",
            millis
        ))
    })
}

/// Formats a millisecond Unix timestamp as a battle label, e.g. "October 19, 2025 18:42".
pub fn format_battle_time(millis: i64) -> Result<String, Error> {
    Ok(millis_to_datetime(millis)?
        .format("%B %-d, %Y %H:%M")
        .to_string())
}

/// Formats a millisecond Unix timestamp for log lines, falling back to the raw milliseconds
/// when the timestamp cannot be represented as a date.
pub fn battle_time_label(millis: i64) -> String {
    format_battle_time(millis).unwrap_or_else(|_| format!("{}ms", millis))
}
