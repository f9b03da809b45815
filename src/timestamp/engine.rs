//! Ordered matcher cascade

use super::error::TimestampError;
use super::matchers::{
    CompactDateTimeMatcher, DateMatcher, DayFirstDateMatcher, EightDigitMatcher,
    FullDateTimeMatcher, PatternMatcher,
};
use super::types::ExtractedTimestamp;
use std::path::Path;
use std::sync::LazyLock;

static DEFAULT_ENGINE: LazyLock<TimestampInferenceEngine> =
    LazyLock::new(TimestampInferenceEngine::new);

/// Infers a recording timestamp from a path using the default matcher order
pub fn infer(path: &str) -> Result<Option<ExtractedTimestamp>, TimestampError> {
    DEFAULT_ENGINE.infer(path)
}

/// Derives a recording date from a path by trying each matcher in priority
/// order and returning the first one that finds its pattern
pub struct TimestampInferenceEngine {
    matchers: Vec<Box<dyn PatternMatcher>>,
}

impl TimestampInferenceEngine {
    /// Create an engine with the built-in matchers, most specific first:
    ///
    /// 1. `YYYY-MM-DD_HH-MM-SS`
    /// 2. `YYYY-MM-DD`
    /// 3. `YYMMDD-HHMMSS`
    /// 4. `DD-MM-YYYY`
    /// 5. `YYYYMMDD` / `DDMMYYYY`
    ///
    /// Several of these overlap on the same input (a full date-time contains
    /// a `YYYY-MM-DD`), so the order is part of the behaviour.
    pub fn new() -> Self {
        Self {
            matchers: vec![
                Box::new(FullDateTimeMatcher),
                Box::new(DateMatcher),
                Box::new(CompactDateTimeMatcher),
                Box::new(DayFirstDateMatcher),
                Box::new(EightDigitMatcher),
            ],
        }
    }

    /// Patterns in evaluation order
    pub fn patterns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matchers.iter().map(|m| m.pattern())
    }

    /// Run the cascade over `path`.
    ///
    /// `Ok(None)` means no matcher found its pattern. An error means the
    /// first matching pattern described an impossible date; lower-priority
    /// matchers are not consulted in that case.
    pub fn infer(&self, path: &str) -> Result<Option<ExtractedTimestamp>, TimestampError> {
        for matcher in &self.matchers {
            if let Some(extracted) = matcher.try_extract(path)? {
                log::debug!(
                    "{:?}: matched {} -> {} ({})",
                    path,
                    matcher.pattern(),
                    extracted.timestamp,
                    extracted.precision
                );
                return Ok(Some(extracted));
            }
        }

        log::debug!("{:?}: no date pattern found", path);
        Ok(None)
    }

    /// Same as [`infer`](Self::infer), for filesystem paths. Non-UTF-8
    /// segments are replaced lossily.
    pub fn infer_path(&self, path: &Path) -> Result<Option<ExtractedTimestamp>, TimestampError> {
        self.infer(&path.to_string_lossy())
    }
}

impl Default for TimestampInferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::Precision;
    use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
    use rstest::rstest;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_pattern_order() {
        let engine = TimestampInferenceEngine::new();
        let patterns: Vec<_> = engine.patterns().collect();
        assert_eq!(
            patterns,
            vec![
                "YYYY-MM-DD_HH-MM-SS",
                "YYYY-MM-DD",
                "YYMMDD-HHMMSS",
                "DD-MM-YYYY",
                "YYYYMMDD/DDMMYYYY",
            ]
        );
    }

    #[test]
    fn test_full_date_time_beats_date_in_directory() {
        let result = infer("/recordings/2023-07-15_14-30-00/track.mp3")
            .unwrap()
            .unwrap();
        assert_eq!(result.timestamp, at(2023, 7, 15, 14, 30, 0));
        assert_eq!(result.precision, Precision::Seconds);
    }

    #[rstest]
    // Date-only beats an earlier bare 8-digit run
    #[case("20200101/2023-07-15.mp3", at(2023, 7, 15, 0, 0, 0), Precision::Days)]
    // Date-only beats an earlier compact date-time
    #[case("230715-143000 2021-01-01.wav", at(2021, 1, 1, 0, 0, 0), Precision::Days)]
    // Compact date-time beats day-first
    #[case("01-02-2022 230715-143000", at(2023, 7, 15, 14, 30, 0), Precision::Seconds)]
    // Day-first beats 8 digits
    #[case("20200101 15-07-2023", at(2023, 7, 15, 0, 0, 0), Precision::Days)]
    // Full date-time appearing later still beats an earlier date-only
    #[case("2020-01-01/x/2023-07-15_14-30-00.wav", at(2023, 7, 15, 14, 30, 0), Precision::Seconds)]
    fn test_priority_order(
        #[case] input: &str,
        #[case] expected: DateTime<Utc>,
        #[case] precision: Precision,
    ) {
        let result = infer(input).unwrap().unwrap();
        assert_eq!(result.timestamp, expected);
        assert_eq!(result.precision, precision);
    }

    #[rstest]
    #[case("230715-143000", at(2023, 7, 15, 14, 30, 0), Precision::Seconds)]
    #[case("15-07-2023", at(2023, 7, 15, 0, 0, 0), Precision::Days)]
    #[case("band practice 20230715.m4a", at(2023, 7, 15, 0, 0, 0), Precision::Days)]
    #[case("band practice 15072023.m4a", at(2023, 7, 15, 0, 0, 0), Precision::Days)]
    fn test_single_pattern_inputs(
        #[case] input: &str,
        #[case] expected: DateTime<Utc>,
        #[case] precision: Precision,
    ) {
        let result = infer(input).unwrap().unwrap();
        assert_eq!(result.timestamp, expected);
        assert_eq!(result.precision, precision);
    }

    #[test]
    fn test_full_date_time_round_trip() {
        let engine = TimestampInferenceEngine::new();
        let samples = [
            at(2000, 1, 1, 0, 0, 0),
            at(1987, 6, 5, 4, 3, 2),
            at(2024, 2, 29, 23, 59, 59),
            at(2031, 10, 31, 12, 0, 1),
        ];

        for expected in samples {
            let name = format!(
                "{:04}-{:02}-{:02}_{:02}-{:02}-{:02}.wav",
                expected.year(),
                expected.month(),
                expected.day(),
                expected.hour(),
                expected.minute(),
                expected.second()
            );
            let result = engine.infer(&name).unwrap().unwrap();
            assert_eq!(result.timestamp, expected, "{}", name);
            assert_eq!(result.precision, Precision::Seconds);
        }
    }

    #[test]
    fn test_no_match() {
        assert_eq!(infer("my_song_final_mix.mp3").unwrap(), None);
        assert_eq!(infer("").unwrap(), None);
    }

    #[test]
    fn test_ambiguous_run_invalid_both_ways_is_error() {
        let err = infer("20231301").unwrap_err();
        assert!(matches!(err, TimestampError::UnrecoverableDate { .. }));
    }

    #[test]
    fn test_invalid_higher_priority_match_does_not_fall_through() {
        // 2023-13-45 matches YYYY-MM-DD; the valid 8-digit run is never tried
        let err = infer("2023-13-45 20230715").unwrap_err();
        assert!(matches!(err, TimestampError::InvalidDate { pattern: "YYYY-MM-DD", .. }));
    }

    #[test]
    fn test_infer_path() {
        let engine = TimestampInferenceEngine::default();
        let path = Path::new("/music/live/2022-11-05/set.flac");
        let result = engine.infer_path(path).unwrap().unwrap();
        assert_eq!(result.timestamp, at(2022, 11, 5, 0, 0, 0));
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let handles: Vec<_> = (1..=4)
            .map(|day| {
                std::thread::spawn(move || {
                    infer(&format!("2023-07-0{}.wav", day)).unwrap().unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            assert_eq!(result.timestamp, at(2023, 7, i as u32 + 1, 0, 0, 0));
        }
    }
}
