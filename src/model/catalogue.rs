use super::TrackMetadata;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Processed recordings, indexed by track ID
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    tracks: HashMap<String, TrackMetadata>,
}

impl Catalogue {
    /// Create a new empty catalogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track, replacing any previous entry with the same ID
    pub fn add(&mut self, track: TrackMetadata) {
        self.tracks.insert(track.id.clone(), track);
    }

    /// Get a track by ID
    pub fn get(&self, id: &str) -> Option<&TrackMetadata> {
        self.tracks.get(id)
    }

    /// Get all tracks, in no particular order
    pub fn tracks(&self) -> impl Iterator<Item = &TrackMetadata> {
        self.tracks.values()
    }

    /// Tracks ordered for the dashboard: most recently recorded first,
    /// ties broken by title
    pub fn newest_first(&self) -> Vec<&TrackMetadata> {
        let mut tracks: Vec<_> = self.tracks.values().collect();
        tracks.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        tracks
    }

    /// Total number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Pretty-printed JSON array in dashboard order
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.newest_first())
            .context("Failed to serialize catalogue")
    }
}
