//! Metadata pre-processing pipeline

use super::config::{FallbackPolicy, IngestConfig};
use crate::model::{Catalogue, TimestampSource, TrackMetadata};
use crate::probe::MetadataProber;
use crate::timestamp::{ExtractedTimestamp, Precision, TimestampInferenceEngine};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Turns audio files into catalogue entries
pub struct IngestPipeline<P: MetadataProber> {
    config: IngestConfig,
    engine: TimestampInferenceEngine,
    prober: P,
}

impl<P: MetadataProber> IngestPipeline<P> {
    /// Create a new ingest pipeline
    pub fn new(config: IngestConfig, prober: P) -> Self {
        Self {
            config,
            engine: TimestampInferenceEngine::new(),
            prober,
        }
    }

    /// Process every input path into a catalogue.
    ///
    /// Files are taken as given; directories are walked for files with an
    /// accepted extension. A file that fails to process is logged and
    /// skipped.
    pub fn ingest(&self, inputs: &[PathBuf]) -> Result<Catalogue> {
        let files = self.collect_files(inputs)?;
        log::info!("Ingesting {} files", files.len());

        let mut catalogue = Catalogue::new();
        for (i, path) in files.iter().enumerate() {
            log::info!("[{}/{}] Processing: {:?}", i + 1, files.len(), path);

            match self.process_file(path) {
                Ok(track) => catalogue.add(track),
                Err(e) => log::warn!("Skipping {:?}: {:#}", path, e),
            }
        }

        log::info!(
            "Ingest complete: {} of {} files catalogued",
            catalogue.len(),
            files.len()
        );
        Ok(catalogue)
    }

    /// Build the metadata record for a single audio file
    pub fn process_file(&self, path: &Path) -> Result<TrackMetadata> {
        let file_metadata =
            fs::metadata(path).with_context(|| format!("Failed to stat {:?}", path))?;

        let probed = self
            .prober
            .probe(path)
            .with_context(|| format!("Failed to probe {:?}", path))?;

        let (recorded, timestamp_source) = self.resolve_timestamp(path, &file_metadata)?;

        let title = probed.title.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled".to_string())
        });

        let format = probed.format.unwrap_or_else(|| {
            path.extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_else(|| "unknown".to_string())
        });

        Ok(TrackMetadata {
            id: TrackMetadata::id_for_path(path),
            title,
            artist: probed.artist,
            format,
            bitrate: probed.bitrate,
            duration_ms: probed.duration_ms,
            recorded_at: recorded.timestamp,
            recorded_precision: recorded.precision,
            timestamp_source,
            file_path: path.to_path_buf(),
            file_size: file_metadata.len(),
        })
    }

    /// Explicit timestamp if configured, else inferred from the path, else
    /// the fallback policy
    fn resolve_timestamp(
        &self,
        path: &Path,
        file_metadata: &fs::Metadata,
    ) -> Result<(ExtractedTimestamp, TimestampSource)> {
        if let Some(explicit) = self.config.explicit_timestamp {
            return Ok((explicit, TimestampSource::Explicit));
        }

        let inferred = self
            .engine
            .infer_path(path)
            .with_context(|| format!("Failed to infer recording date from {:?}", path))?;

        if let Some(inferred) = inferred {
            return Ok((inferred, TimestampSource::Inferred));
        }

        let fallback = match self.config.fallback {
            FallbackPolicy::Now => Utc::now(),
            FallbackPolicy::FileModified => file_metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|e| {
                    log::debug!("No mtime for {:?} ({}), using current time", path, e);
                    Utc::now()
                }),
        };
        log::debug!("{:?}: no date in path, falling back to {}", path, fallback);

        Ok((
            ExtractedTimestamp::new(fallback, Precision::Seconds),
            TimestampSource::Fallback,
        ))
    }

    /// Expand inputs into the list of files to process
    fn collect_files(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for input in inputs {
            let metadata =
                fs::metadata(input).with_context(|| format!("Input not found: {:?}", input))?;

            if !metadata.is_dir() {
                files.push(input.clone());
                continue;
            }

            let max_depth = if self.config.recursive { usize::MAX } else { 1 };
            let walker = WalkDir::new(input)
                .min_depth(1)
                .max_depth(max_depth)
                .sort_by_file_name();

            for entry in walker {
                match entry {
                    Ok(entry) => {
                        let accepted = entry.file_type().is_file()
                            && entry
                                .path()
                                .extension()
                                .is_some_and(|e| self.config.accepts_extension(&e.to_string_lossy()));
                        if accepted {
                            files.push(entry.into_path());
                        }
                    }
                    Err(e) => log::warn!("Error accessing entry: {}", e),
                }
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ProbeResult, StubProber};
    use chrono::TimeZone;
    use tempfile::TempDir;

    struct FixedProber;

    impl MetadataProber for FixedProber {
        fn probe(&self, _audio_path: &Path) -> Result<ProbeResult> {
            Ok(ProbeResult {
                title: Some("Tagged".to_string()),
                artist: Some("Band".to_string()),
                format: Some("mp3".to_string()),
                bitrate: Some(320_000),
                duration_ms: Some(61_000),
            })
        }
    }

    fn write(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"dummy audio data").unwrap();
        path
    }

    #[test]
    fn test_process_file_infers_from_name() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "practice 2023-07-15.wav");

        let pipeline = IngestPipeline::new(IngestConfig::new(), StubProber::new());
        let track = pipeline.process_file(&path).unwrap();

        assert_eq!(track.title, "practice 2023-07-15");
        assert_eq!(track.format, "wav");
        assert_eq!(track.artist, None);
        assert_eq!(track.file_size, 16);
        assert_eq!(
            track.recorded_at,
            Utc.with_ymd_and_hms(2023, 7, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(track.recorded_precision, Precision::Days);
        assert_eq!(track.timestamp_source, TimestampSource::Inferred);
    }

    #[test]
    fn test_probe_results_take_precedence() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "230715-143000.wav");

        let pipeline = IngestPipeline::new(IngestConfig::new(), FixedProber);
        let track = pipeline.process_file(&path).unwrap();

        assert_eq!(track.title, "Tagged");
        assert_eq!(track.display_name(), "Band - Tagged");
        assert_eq!(track.format, "mp3");
        assert_eq!(track.bitrate, Some(320_000));
        assert_eq!(track.duration_ms, Some(61_000));
        assert_eq!(track.recorded_precision, Precision::Seconds);
    }

    #[test]
    fn test_explicit_timestamp_overrides_inference() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "2023-07-15.wav");
        let explicit = ExtractedTimestamp::new(
            Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap(),
            Precision::Hours,
        );

        let config = IngestConfig::new().with_explicit_timestamp(explicit);
        let pipeline = IngestPipeline::new(config, StubProber::new());
        let track = pipeline.process_file(&path).unwrap();

        assert_eq!(track.recorded_at, explicit.timestamp);
        assert_eq!(track.recorded_precision, Precision::Hours);
        assert_eq!(track.timestamp_source, TimestampSource::Explicit);
    }

    #[test]
    fn test_fallback_when_no_date() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "my_song_final_mix.mp3");

        let before = Utc::now();
        let pipeline = IngestPipeline::new(IngestConfig::new(), StubProber::new());
        let track = pipeline.process_file(&path).unwrap();

        assert_eq!(track.timestamp_source, TimestampSource::Fallback);
        assert_eq!(track.recorded_precision, Precision::Seconds);
        assert!(track.recorded_at >= before);
    }

    #[test]
    fn test_fallback_file_modified() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "untitled.mp3");
        let mtime: DateTime<Utc> = fs::metadata(&path).unwrap().modified().unwrap().into();

        let config = IngestConfig::new().with_fallback(FallbackPolicy::FileModified);
        let pipeline = IngestPipeline::new(config, StubProber::new());
        let track = pipeline.process_file(&path).unwrap();

        assert_eq!(track.recorded_at, mtime);
        assert_eq!(track.timestamp_source, TimestampSource::Fallback);
    }

    #[test]
    fn test_unrecoverable_date_is_error() {
        let temp = TempDir::new().unwrap();
        let path = write(temp.path(), "20231301.mp3");

        let pipeline = IngestPipeline::new(IngestConfig::new(), StubProber::new());
        assert!(pipeline.process_file(&path).is_err());
    }

    #[test]
    fn test_collect_files_filters_and_respects_depth() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.mp3");
        write(temp.path(), "notes.txt");
        fs::create_dir(temp.path().join("sub")).unwrap();
        write(&temp.path().join("sub"), "b.flac");

        let inputs = vec![temp.path().to_path_buf()];

        let shallow = IngestPipeline::new(IngestConfig::new(), StubProber::new());
        let files = shallow.collect_files(&inputs).unwrap();
        assert_eq!(files, vec![temp.path().join("a.mp3")]);

        let deep = IngestPipeline::new(IngestConfig::new().recursive(true), StubProber::new());
        let files = deep.collect_files(&inputs).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_input_is_error() {
        let pipeline = IngestPipeline::new(IngestConfig::new(), StubProber::new());
        let result = pipeline.ingest(&[PathBuf::from("/nonexistent/bandage/input")]);
        assert!(result.is_err());
    }
}
