//! Recording timestamp inference
//!
//! Derives when a recording was made from its file path, for uploads that
//! arrive without an explicit date. Five fixed filename encodings are
//! recognised and tried from most to least specific.

mod engine;
mod error;
pub mod format;
mod matchers;
mod types;

pub use engine::{infer, TimestampInferenceEngine};
pub use error::TimestampError;
pub use matchers::{
    CompactDateTimeMatcher, DateMatcher, DayFirstDateMatcher, EightDigitMatcher,
    FullDateTimeMatcher, PatternMatcher,
};
pub use types::{ExtractedTimestamp, Precision};
