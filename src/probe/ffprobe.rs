//! ffprobe-backed metadata prober
//!
//! Runs `ffprobe -v quiet -print_format json -show_format <file>` and reads
//! the `format` section of its output.

use super::traits::{MetadataProber, ProbeResult};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Prober that shells out to ffprobe
pub struct FfprobeProber {
    /// ffprobe executable (name on PATH or absolute path)
    binary: PathBuf,
}

impl FfprobeProber {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffprobe"),
        }
    }

    /// Use a specific ffprobe executable
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataProber for FfprobeProber {
    fn probe(&self, audio_path: &Path) -> Result<ProbeResult> {
        log::debug!("Running {:?} on {:?}", self.binary, audio_path);

        let output = Command::new(&self.binary)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(audio_path)
            .output()
            .with_context(|| format!("Failed to run {:?}", self.binary))?;

        if !output.status.success() {
            anyhow::bail!(
                "{:?} exited with {} for {:?}",
                self.binary,
                output.status,
                audio_path
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_ffprobe_output(&stdout)
            .with_context(|| format!("Failed to parse ffprobe output for {:?}", audio_path))
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    // ffprobe prints numbers as strings in this section
    duration: Option<String>,
    bit_rate: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Parse the JSON printed by `ffprobe -print_format json -show_format`
pub fn parse_ffprobe_output(json: &str) -> Result<ProbeResult> {
    let parsed: FfprobeOutput = serde_json::from_str(json).context("Invalid ffprobe JSON")?;
    let format = parsed.format;

    // Tag key case depends on the container (ID3 "title", Vorbis "TITLE")
    let tag = |name: &str| {
        format
            .tags
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let duration_ms = format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .map(|d| (d * 1000.0).round() as u64);

    let bitrate = format
        .bit_rate
        .as_deref()
        .and_then(|b| b.parse::<u32>().ok());

    // Demuxers with several aliases report e.g. "mov,mp4,m4a,3gp,3g2,mj2"
    let format_name = format
        .format_name
        .as_deref()
        .and_then(|name| name.split(',').next())
        .map(str::to_string);

    Ok(ProbeResult {
        title: tag("title"),
        artist: tag("artist"),
        format: format_name,
        bitrate,
        duration_ms,
    })
}
