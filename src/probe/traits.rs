//! Prober trait definitions and data structures

use anyhow::Result;
use std::path::Path;

/// Metadata prober trait - allows swapping between ffprobe and path-only implementations
pub trait MetadataProber {
    /// Read whatever technical and tag metadata the file exposes
    fn probe(&self, audio_path: &Path) -> Result<ProbeResult>;
}

/// Metadata read from an audio file. Every field is optional; callers fill
/// gaps from the path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResult {
    /// Title tag
    pub title: Option<String>,

    /// Artist tag
    pub artist: Option<String>,

    /// Container format name, e.g. "mp3"
    pub format: Option<String>,

    /// Overall bitrate in bits per second
    pub bitrate: Option<u32>,

    /// Duration in milliseconds
    pub duration_ms: Option<u64>,
}
