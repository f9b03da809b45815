//! Timestamp value types shared by the inference engine and its consumers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a recorded timestamp
///
/// The inference engine only ever produces `Seconds` or `Days`. The other
/// variants exist for explicitly supplied timestamps and display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl Precision {
    /// Lowercase name, as used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Seconds => "seconds",
            Precision::Minutes => "minutes",
            Precision::Hours => "hours",
            Precision::Days => "days",
            Precision::Months => "months",
            Precision::Years => "years",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamp recovered from a path, together with how much of it was
/// actually present in the source string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTimestamp {
    /// Instant in UTC. Time of day is midnight when `precision` is `Days`.
    pub timestamp: DateTime<Utc>,

    /// Granularity of `timestamp`
    pub precision: Precision,
}

impl ExtractedTimestamp {
    pub fn new(timestamp: DateTime<Utc>, precision: Precision) -> Self {
        Self {
            timestamp,
            precision,
        }
    }
}
