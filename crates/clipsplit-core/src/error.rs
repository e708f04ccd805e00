//! Unified error type for clipsplit.
//!
//! Every crate in the workspace funnels its failures into [`Error`]. Failures
//! of the external tools keep the tool name so the CLI can tell the user
//! which binary misbehaved.

use std::path::PathBuf;

use crate::ranges::PlanError;

/// Unified error type covering all failure modes in clipsplit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input data or configuration failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An external tool (ffmpeg, ffprobe) returned an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// The duration probe produced no usable value.
    #[error("Probe error: {0}")]
    Probe(String),

    /// No ranges can be computed for the requested chunking.
    #[error("Nothing to split: {0}")]
    Plan(#[from] PlanError),

    /// The input media file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A path lacks the component an operation needs (e.g. a file name).
    #[error("invalid path: {}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::FileNotFound`].
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Whether this error is the planner's "nothing to split" signal.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Error::Plan(_))
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
