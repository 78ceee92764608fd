//! Weekly time-of-day helpers for availability windows.
//!
//! Availability is stored as zero-padded `HH:MM` strings so that string comparison in
//! SQL matches chronological order. Every inbound time goes through `normalize_hhmm`.

use chrono::{DateTime, Datelike, Utc};

/// Parses a 24-hour `H:MM` or `HH:MM` time into zero-padded `HH:MM`.
///
/// Accepts exactly what `^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$` accepts.
///
/// # Returns
/// - `Some(String)` - Normalized time, e.g. `"9:05"` → `"09:05"`
/// - `None` - Input isn't a valid time of day
pub fn normalize_hhmm(value: &str) -> Option<String> {
    let (hours, minutes) = value.split_once(':')?;

    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u32 = hours.parse().ok()?;
    let minute: u32 = minutes.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }

    Some(format!("{:02}:{:02}", hour, minute))
}

/// Day of week for a UTC instant, 0 = Sunday through 6 = Saturday.
pub fn weekday_index(date: DateTime<Utc>) -> i32 {
    date.weekday().num_days_from_sunday() as i32
}

/// UTC time of day for an instant as zero-padded `HH:MM`.
pub fn time_of_day(date: DateTime<Utc>) -> String {
    date.format("%H:%M").to_string()
}
