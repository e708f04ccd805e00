//! # clipsplit-av
//!
//! External tool handling for clipsplit.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg
//!   and ffprobe, honouring configured overrides.
//! - **Command execution** ([`ToolCommand`], [`ToolProcess`]) -- async builder
//!   with timeout support and an explicit handle to the running process.
//! - **Duration probing** ([`probe_duration`]) -- ask ffprobe how long a file is.
//! - **Segment extraction** ([`extract_segment`]) -- copy one time range of a
//!   file into its own output with ffmpeg.

pub mod command;
pub mod extract;
pub mod probe;
pub mod process;
pub mod tools;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use extract::{extract_args, extract_segment};
pub use probe::{parse_duration, probe_duration};
pub use process::ToolProcess;
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
