//! Configuration types.
//!
//! The top-level [`Config`] carries the split settings and the external tool
//! overrides. Every section defaults sensibly so an empty file is valid.
//! Reading and parsing the file is left to the caller.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ranges::ChunkConfig;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub split: SplitConfig,
    pub tools: ToolsConfig,
}

impl Config {
    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.split.jobs > 8 {
            warnings.push(format!(
                "split.jobs is {}; running many ffmpeg processes at once may saturate the disk",
                self.split.jobs
            ));
        }

        if let Some(ref dir) = self.split.output_dir {
            if dir.exists() && !dir.is_dir() {
                warnings.push(format!(
                    "split.output_dir {} exists but is not a directory",
                    dir.display()
                ));
            }
        }

        for (name, path) in [
            ("ffmpeg_path", &self.tools.ffmpeg_path),
            ("ffprobe_path", &self.tools.ffprobe_path),
        ] {
            if let Some(p) = path {
                if !p.exists() {
                    warnings.push(format!(
                        "tools.{name} {} does not exist; falling back to PATH",
                        p.display()
                    ));
                }
            }
        }

        if self.tools.timeout_secs == 0 {
            warnings.push("tools.timeout_secs is 0; every tool run will time out".into());
        }

        warnings
    }
}

/// How files are split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Length of each clip in minutes.
    pub clip_duration_minutes: f64,
    /// Seconds shared by consecutive clips.
    pub clip_overlap_seconds: f64,
    /// Maximum number of concurrent ffmpeg processes.
    pub jobs: usize,
    /// Directory for the produced clips; defaults to the source file's folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl SplitConfig {
    /// The chunking settings handed to the range planner.
    pub fn chunk(&self) -> ChunkConfig {
        ChunkConfig::new(self.clip_duration_minutes, self.clip_overlap_seconds)
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            clip_duration_minutes: 10.0,
            clip_overlap_seconds: 0.0,
            jobs: 1,
            output_dir: None,
        }
    }
}

/// Paths to external CLI tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ffprobe_path: Option<PathBuf>,
    /// Maximum run time of a single tool invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    3600
}

impl ToolsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert_eq!(cfg.split.clip_duration_minutes, 10.0);
        assert_eq!(cfg.split.clip_overlap_seconds, 0.0);
        assert_eq!(cfg.split.jobs, 1);
        assert!(cfg.split.output_dir.is_none());
        assert_eq!(cfg.tools.timeout(), Duration::from_secs(3600));
        assert!(cfg.split.chunk().validate().is_ok());
    }

    #[test]
    fn default_config_no_warnings() {
        let warnings = Config::default().validate();
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn missing_tool_path_warns() {
        let mut cfg = Config::default();
        cfg.tools.ffprobe_path = Some(PathBuf::from("/nonexistent/ffprobe"));
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("ffprobe_path")));
    }

    #[test]
    fn zero_timeout_warns() {
        let mut cfg = Config::default();
        cfg.tools.timeout_secs = 0;
        assert!(cfg.validate().iter().any(|w| w.contains("timeout_secs")));
    }

    #[test]
    fn chunk_mirrors_split_settings() {
        let split = SplitConfig {
            clip_duration_minutes: 30.0,
            clip_overlap_seconds: 15.0,
            ..SplitConfig::default()
        };
        assert_eq!(split.chunk(), ChunkConfig::new(30.0, 15.0));
    }

    #[test]
    fn parse_partial_json_uses_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{"split": {"clip_overlap_seconds": 30}}"#).unwrap();
        assert_eq!(cfg.split.clip_overlap_seconds, 30.0);
        assert_eq!(cfg.split.clip_duration_minutes, 10.0);
        assert_eq!(cfg.tools.timeout_secs, 3600);
    }
}
