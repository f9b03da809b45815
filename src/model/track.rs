use crate::timestamp::Precision;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Catalogued metadata for one uploaded recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Unique identifier (md5 of the source path)
    pub id: String,

    /// Track title, from tags or the file stem
    pub title: String,

    /// Artist name (optional)
    pub artist: Option<String>,

    /// Container format name, e.g. "mp3" or "wav"
    pub format: String,

    /// Bitrate in bits per second (optional)
    pub bitrate: Option<u32>,

    /// Duration in milliseconds (optional)
    pub duration_ms: Option<u64>,

    /// When the recording was made
    pub recorded_at: DateTime<Utc>,

    /// Granularity of `recorded_at`
    pub recorded_precision: Precision,

    /// Where `recorded_at` came from
    pub timestamp_source: TimestampSource,

    /// File path to the audio file
    pub file_path: PathBuf,

    /// File size in bytes
    pub file_size: u64,
}

/// Origin of a track's recorded timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampSource {
    /// Supplied by the uploader
    Explicit,

    /// Recovered from the file path
    Inferred,

    /// Nothing usable was found; current time or file mtime was used
    Fallback,
}

impl TimestampSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampSource::Explicit => "explicit",
            TimestampSource::Inferred => "inferred",
            TimestampSource::Fallback => "fallback",
        }
    }
}

impl TrackMetadata {
    /// Stable track ID derived from the file path
    pub fn id_for_path(path: &Path) -> String {
        format!("{:x}", md5::compute(path.to_string_lossy().as_bytes()))
    }

    /// "Artist - Title", or just the title when the artist is unknown
    pub fn display_name(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} - {}", artist, self.title),
            None => self.title.clone(),
        }
    }
}
