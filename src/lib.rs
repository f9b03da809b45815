//! Bandage - recording catalogue metadata
//!
//! This library prepares uploaded audio recordings for cataloguing: it
//! probes technical metadata and works out when each recording was made,
//! inferring the date from the file path when none is supplied.

pub mod ingest;
pub mod model;
pub mod probe;
pub mod timestamp;

pub use ingest::{IngestConfig, IngestPipeline};
pub use timestamp::{infer, ExtractedTimestamp, Precision, TimestampInferenceEngine};
