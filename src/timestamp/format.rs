//! Precision-aware display of recorded timestamps
//!
//! A timestamp inferred from `2023-07-15.wav` has no meaningful time of
//! day, so it must not be shown as `2023-07-15 00:00:00`.

use super::types::Precision;
use chrono::{DateTime, Utc};

/// Compact form for listings, e.g. `2023-07-15` or `2023-07-15 14:30:00`
pub fn format_short(timestamp: &DateTime<Utc>, precision: Precision) -> String {
    let pattern = match precision {
        Precision::Seconds => "%Y-%m-%d %H:%M:%S",
        Precision::Minutes => "%Y-%m-%d %H:%M",
        Precision::Hours => "%Y-%m-%d %H:00",
        Precision::Days => "%Y-%m-%d",
        Precision::Months => "%Y-%m",
        Precision::Years => "%Y",
    };
    timestamp.format(pattern).to_string()
}

/// Verbose form for detail views, e.g. `Saturday 15 July 2023`
pub fn format_long(timestamp: &DateTime<Utc>, precision: Precision) -> String {
    let pattern = match precision {
        Precision::Seconds => "%A %-d %B %Y, %H:%M:%S",
        Precision::Minutes => "%A %-d %B %Y, %H:%M",
        Precision::Hours => "%A %-d %B %Y, %H:00",
        Precision::Days => "%A %-d %B %Y",
        Precision::Months => "%B %Y",
        Precision::Years => "%Y",
    };
    timestamp.format(pattern).to_string()
}
