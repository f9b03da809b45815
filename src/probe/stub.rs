//! Path-only prober
//!
//! Never touches the file contents. Used when ffprobe is unavailable and in
//! tests; the ingest pipeline fills title and format from the path.

use super::traits::{MetadataProber, ProbeResult};
use anyhow::Result;
use std::path::Path;

/// Prober that reports no metadata
pub struct StubProber;

impl StubProber {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StubProber {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProber for StubProber {
    fn probe(&self, audio_path: &Path) -> Result<ProbeResult> {
        log::debug!("Stub probe (path only) for: {:?}", audio_path);
        Ok(ProbeResult::default())
    }
}
