//! Errors raised while turning a matched substring into a timestamp

use thiserror::Error;

/// A date-like substring was found but does not describe a real instant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// A fixed-format pattern matched, but its fields are out of range
    /// (e.g. `2023-13-45`)
    #[error("{pattern} match {matched:?} is not a valid date/time")]
    InvalidDate {
        pattern: &'static str,
        matched: String,
    },

    /// Neither year-first nor day-first reading of a bare 8-digit run is a
    /// valid calendar date
    #[error("8-digit run {digits:?} is not a valid date as YYYYMMDD or DDMMYYYY")]
    UnrecoverableDate { digits: String },
}
