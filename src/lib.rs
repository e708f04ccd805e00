//! Clipsplit - split media files into overlapping clips with ffmpeg
//!
//! This library crate exposes the orchestration layer for integration testing.

pub mod config;
pub mod split;

pub use split::Splitter;
