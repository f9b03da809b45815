//! Filename date/time pattern matchers
//!
//! Each matcher recognises exactly one textual encoding of a date (and
//! possibly a time) anywhere inside a string. The engine tries them in a
//! fixed order; see [`super::engine`].
//!
//! Patterns use `[0-9]` rather than `\d` so that only ASCII digits match.

use super::error::TimestampError;
use super::types::{ExtractedTimestamp, Precision};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

static FULL_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}_[0-9]{2}-[0-9]{2}-[0-9]{2}")
        .expect("full date-time pattern is valid")
});

static DATE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("date pattern is valid")
});

static COMPACT_DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{6}-[0-9]{6}").expect("compact date-time pattern is valid")
});

static DAY_FIRST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{2}-[0-9]{2}-[0-9]{4}").expect("day-first date pattern is valid")
});

// The regex crate has no lookaround, so the run is bounded by non-digit
// characters (or the ends of the input) and captured in group 1.
static EIGHT_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{8})(?:[^0-9]|$)").expect("8-digit pattern is valid")
});

/// Recognises one fixed date/time encoding inside an arbitrary string
pub trait PatternMatcher: Send + Sync {
    /// Short human-readable form of the pattern, e.g. `YYYY-MM-DD`
    fn pattern(&self) -> &'static str;

    /// Find the leftmost occurrence of the pattern and convert it.
    ///
    /// Returns `Ok(None)` when the pattern does not occur at all.
    fn try_extract(&self, input: &str) -> Result<Option<ExtractedTimestamp>, TimestampError>;
}

/// `YYYY-MM-DD_HH-MM-SS`
#[derive(Debug, Clone, Copy, Default)]
pub struct FullDateTimeMatcher;

/// `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateMatcher;

/// `YYMMDD-HHMMSS`, years 2000-2099 only
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactDateTimeMatcher;

/// `DD-MM-YYYY`
#[derive(Debug, Clone, Copy, Default)]
pub struct DayFirstDateMatcher;

/// Bare `YYYYMMDD` or `DDMMYYYY`
///
/// Year-first is tried first; day-first only when year-first does not form
/// a valid calendar date. When both readings are valid the year-first one
/// wins without further checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct EightDigitMatcher;

impl PatternMatcher for FullDateTimeMatcher {
    fn pattern(&self) -> &'static str {
        "YYYY-MM-DD_HH-MM-SS"
    }

    fn try_extract(&self, input: &str) -> Result<Option<ExtractedTimestamp>, TimestampError> {
        let Some(m) = FULL_DATE_TIME.find(input) else {
            return Ok(None);
        };
        let matched = m.as_str();

        let timestamp = match numeric_fields(matched, &['_', '-'])[..] {
            [year, month, day, hour, minute, second] => {
                utc(year as i32, month, day, hour, minute, second)
            }
            _ => None,
        };

        finish(self.pattern(), matched, timestamp, Precision::Seconds)
    }
}

impl PatternMatcher for DateMatcher {
    fn pattern(&self) -> &'static str {
        "YYYY-MM-DD"
    }

    fn try_extract(&self, input: &str) -> Result<Option<ExtractedTimestamp>, TimestampError> {
        let Some(m) = DATE_ONLY.find(input) else {
            return Ok(None);
        };
        let matched = m.as_str();

        let timestamp = match numeric_fields(matched, &['-'])[..] {
            [year, month, day] => utc(year as i32, month, day, 0, 0, 0),
            _ => None,
        };

        finish(self.pattern(), matched, timestamp, Precision::Days)
    }
}

impl PatternMatcher for CompactDateTimeMatcher {
    fn pattern(&self) -> &'static str {
        "YYMMDD-HHMMSS"
    }

    fn try_extract(&self, input: &str) -> Result<Option<ExtractedTimestamp>, TimestampError> {
        let Some(m) = COMPACT_DATE_TIME.find(input) else {
            return Ok(None);
        };
        let matched = m.as_str();

        let timestamp = matched.split_once('-').and_then(|(date, time)| {
            let [yy, month, day] = digit_pairs(date)?;
            let [hour, minute, second] = digit_pairs(time)?;
            // Two-digit years always land in the 2000s
            utc(2000 + yy as i32, month, day, hour, minute, second)
        });

        finish(self.pattern(), matched, timestamp, Precision::Seconds)
    }
}

impl PatternMatcher for DayFirstDateMatcher {
    fn pattern(&self) -> &'static str {
        "DD-MM-YYYY"
    }

    fn try_extract(&self, input: &str) -> Result<Option<ExtractedTimestamp>, TimestampError> {
        let Some(m) = DAY_FIRST_DATE.find(input) else {
            return Ok(None);
        };
        let matched = m.as_str();

        let timestamp = match numeric_fields(matched, &['-'])[..] {
            [day, month, year] => utc(year as i32, month, day, 0, 0, 0),
            _ => None,
        };

        finish(self.pattern(), matched, timestamp, Precision::Days)
    }
}

impl PatternMatcher for EightDigitMatcher {
    fn pattern(&self) -> &'static str {
        "YYYYMMDD/DDMMYYYY"
    }

    fn try_extract(&self, input: &str) -> Result<Option<ExtractedTimestamp>, TimestampError> {
        let Some(digits) = EIGHT_DIGITS
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            return Ok(None);
        };

        let timestamp = year_first(digits)
            .or_else(|| {
                log::debug!("{} is not YYYYMMDD, trying DDMMYYYY", digits);
                day_first(digits)
            })
            .ok_or_else(|| TimestampError::UnrecoverableDate {
                digits: digits.to_string(),
            })?;

        Ok(Some(ExtractedTimestamp::new(timestamp, Precision::Days)))
    }
}

/// `YYYY MM DD`
fn year_first(digits: &str) -> Option<DateTime<Utc>> {
    let year = digits.get(0..4)?.parse().ok()?;
    let month = digits.get(4..6)?.parse().ok()?;
    let day = digits.get(6..8)?.parse().ok()?;
    utc(year, month, day, 0, 0, 0)
}

/// `DD MM YYYY`
fn day_first(digits: &str) -> Option<DateTime<Utc>> {
    let day = digits.get(0..2)?.parse().ok()?;
    let month = digits.get(2..4)?.parse().ok()?;
    let year = digits.get(4..8)?.parse().ok()?;
    utc(year, month, day, 0, 0, 0)
}

/// Split on any of `separators` and parse every piece.
/// An unparsable piece yields an empty vector.
fn numeric_fields(matched: &str, separators: &[char]) -> Vec<u32> {
    matched
        .split(separators)
        .map(|part| part.parse().ok())
        .collect::<Option<Vec<u32>>>()
        .unwrap_or_default()
}

/// Split a 6-digit group into three 2-digit numbers
fn digit_pairs(group: &str) -> Option<[u32; 3]> {
    Some([
        group.get(0..2)?.parse().ok()?,
        group.get(2..4)?.parse().ok()?,
        group.get(4..6)?.parse().ok()?,
    ])
}

fn utc(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Some(Utc.from_utc_datetime(&naive))
}

fn finish(
    pattern: &'static str,
    matched: &str,
    timestamp: Option<DateTime<Utc>>,
    precision: Precision,
) -> Result<Option<ExtractedTimestamp>, TimestampError> {
    match timestamp {
        Some(timestamp) => Ok(Some(ExtractedTimestamp::new(timestamp, precision))),
        None => Err(TimestampError::InvalidDate {
            pattern,
            matched: matched.to_string(),
        }),
    }
}
