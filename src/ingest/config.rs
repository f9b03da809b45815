//! Ingest configuration

use crate::timestamp::ExtractedTimestamp;

/// Audio extensions picked up when walking a directory
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a", "aac", "aiff", "opus"];

/// Configuration for the ingest process
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Timestamp supplied by the uploader; overrides inference for every file
    pub explicit_timestamp: Option<ExtractedTimestamp>,

    /// What to use when neither an explicit nor an inferred timestamp exists
    pub fallback: FallbackPolicy,

    /// Descend into subdirectories of directory inputs
    pub recursive: bool,

    /// Lowercase extensions (without dot) accepted from directory walks
    pub extensions: Vec<String>,
}

/// Source of the recorded timestamp when the path has no date in it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Time of ingestion
    Now,

    /// File modification time, or ingestion time if the platform has none
    FileModified,
}

impl IngestConfig {
    /// Create a new ingest configuration
    pub fn new() -> Self {
        Self {
            explicit_timestamp: None,
            fallback: FallbackPolicy::Now,
            recursive: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Use the same recorded timestamp for every file
    pub fn with_explicit_timestamp(mut self, timestamp: ExtractedTimestamp) -> Self {
        self.explicit_timestamp = Some(timestamp);
        self
    }

    /// Set fallback policy
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Walk directory inputs recursively
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the accepted extension list
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Whether a file name has one of the accepted extensions
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.extensions.iter().any(|e| *e == extension)
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::new()
    }
}
