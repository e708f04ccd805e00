//! clipsplit-core: range planning, media descriptors, errors and configuration.
//!
//! This crate is the foundational dependency of the other clipsplit crates.
//! It has no I/O beyond path inspection; running ffmpeg lives in
//! `clipsplit-av`.

pub mod config;
pub mod error;
pub mod media;
pub mod ranges;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::{segment_filename, MediaFile};
pub use ranges::{compute_ranges, ChunkConfig, PlanError, Range, MAX_RANGES};
