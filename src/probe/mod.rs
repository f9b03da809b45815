//! Audio metadata probing
//!
//! Reads title, artist, format, bitrate and duration from audio files
//! through a trait-based abstraction. `FfprobeProber` calls the external
//! ffprobe tool; `StubProber` reports nothing and lets the ingest pipeline
//! fall back to the file path.

mod ffprobe;
mod stub;
mod traits;

pub use ffprobe::{parse_ffprobe_output, FfprobeProber};
pub use stub::StubProber;
pub use traits::{MetadataProber, ProbeResult};
