//! Catalogued track data
//!
//! Independent of how metadata was obtained (ffprobe, tags, path) and of
//! where it will be persisted.

mod catalogue;
mod track;

pub use catalogue::Catalogue;
pub use track::{TimestampSource, TrackMetadata};
