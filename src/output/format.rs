// Display formatting for counts and timestamps.

use chrono::{DateTime, Utc};

/// Compact count: `1.5K`, `2.5M`, or the plain integer below 1000.
pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Relative age of a timestamp as of `now`.
///
/// Minutes under an hour, hours under a day, days under a week, then a
/// short month/day date. Timestamps after `now` read as `0m ago`.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - timestamp).max(chrono::Duration::zero());
    let mins = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if mins < 60 {
        format!("{mins}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        timestamp.format("%b %-d").to_string()
    }
}
