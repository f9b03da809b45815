//! Metadata pre-processing for uploaded recordings

pub mod config;
pub mod pipeline;

pub use config::{FallbackPolicy, IngestConfig};
pub use pipeline::IngestPipeline;
