//! Segment range planning.
//!
//! [`compute_ranges`] turns a media duration and a [`ChunkConfig`] into the
//! ordered list of `(start, end)` windows a caller extracts, one external
//! tool invocation per window. Consecutive windows share
//! `clip_overlap_seconds` of content.
//!
//! ```
//! use clipsplit_core::{compute_ranges, ChunkConfig, Range};
//!
//! let chunk = ChunkConfig::new(10.0, 60.0);
//! let ranges = compute_ranges(1000.0, &chunk)?;
//! assert_eq!(ranges, vec![Range::new(0.0, 600.0), Range::new(540.0, 1000.0)]);
//! # Ok::<(), clipsplit_core::PlanError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seconds per minute, used to convert the configured clip length.
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Upper bound on the number of windows a single plan may contain.
pub const MAX_RANGES: usize = 1_000_000;

/// Chunking settings: how long each clip is and how much neighbours overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkConfig {
    /// Desired length of each clip, in minutes.
    pub clip_duration_minutes: f64,
    /// Seconds of media shared between the end of one clip and the start of
    /// the next.
    pub clip_overlap_seconds: f64,
}

impl ChunkConfig {
    pub fn new(clip_duration_minutes: f64, clip_overlap_seconds: f64) -> Self {
        Self {
            clip_duration_minutes,
            clip_overlap_seconds,
        }
    }

    /// Clip length converted to seconds.
    pub fn clip_duration_seconds(&self) -> f64 {
        self.clip_duration_minutes * SECONDS_PER_MINUTE
    }

    /// Check that ranges can be planned with these settings.
    ///
    /// The overlap must stay strictly below the clip length, otherwise the
    /// start of the next clip would not advance.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.clip_duration_seconds().is_finite() || self.clip_duration_minutes <= 0.0 {
            return Err(PlanError::InvalidClipDuration(self.clip_duration_minutes));
        }
        if !self.clip_overlap_seconds.is_finite() || self.clip_overlap_seconds < 0.0 {
            return Err(PlanError::NegativeOverlap(self.clip_overlap_seconds));
        }
        let clip = self.clip_duration_seconds();
        if self.clip_overlap_seconds >= clip {
            return Err(PlanError::OverlapTooLarge {
                overlap: self.clip_overlap_seconds,
                clip,
            });
        }
        Ok(())
    }
}

/// Reasons the planner cannot produce ranges.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("clip duration must be greater than zero minutes (got {0})")]
    InvalidClipDuration(f64),

    #[error("clip overlap must not be negative (got {0}s)")]
    NegativeOverlap(f64),

    #[error("clip overlap of {overlap}s must be shorter than the clip length of {clip}s")]
    OverlapTooLarge { overlap: f64, clip: f64 },

    #[error("media duration must be a non-negative number of seconds (got {0})")]
    InvalidDuration(f64),

    #[error("{duration}s in {clip}s clips needs more than {max} ranges", max = MAX_RANGES)]
    TooManyRanges { duration: f64, clip: f64 },
}

/// A closed `[start, end]` time window in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub start: f64,
    pub end: f64,
}

impl Range {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the window in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s-{}s", self.start, self.end)
    }
}

/// Compute the ordered clip windows for a media file of `duration` seconds.
///
/// Full-length clips are emitted while more than one clip length of media
/// remains; whatever is left becomes a final tail window ending exactly at
/// `duration`. Window `i` starts at `i * (clip - overlap)`.
///
/// # Errors
///
/// Returns a [`PlanError`] when the chunking settings are invalid (see
/// [`ChunkConfig::validate`]), `duration` is negative or not finite, or the
/// plan would hold more than [`MAX_RANGES`] windows. Callers treat this as
/// "nothing to split".
pub fn compute_ranges(duration: f64, chunk: &ChunkConfig) -> Result<Vec<Range>, PlanError> {
    chunk.validate()?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(PlanError::InvalidDuration(duration));
    }

    let clip = chunk.clip_duration_seconds();
    let step = clip - chunk.clip_overlap_seconds;

    // Window i is full-length while (i + 1) * clip < duration.
    let estimate = (duration / clip - 1.0).ceil().max(0.0);
    if estimate >= MAX_RANGES as f64 {
        return Err(PlanError::TooManyRanges { duration, clip });
    }
    let mut full = estimate as usize;
    while full > 0 && full as f64 * clip >= duration {
        full -= 1;
    }
    while (full + 1) as f64 * clip < duration {
        full += 1;
    }

    let mut ranges = Vec::with_capacity(full + 1);
    for i in 0..full {
        let start = i as f64 * step;
        ranges.push(Range::new(start, start + clip));
    }
    let tail_start = full as f64 * step;
    if tail_start < duration {
        ranges.push(Range::new(tail_start, duration));
    }

    tracing::trace!(duration, clip, count = ranges.len(), "planned ranges");
    Ok(ranges)
}
