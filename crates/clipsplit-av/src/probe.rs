//! Media duration probing via ffprobe.
//!
//! Runs `ffprobe -v error -show_entries format=duration -of
//! default=noprint_wrappers=1:nokey=1 <file>`, which prints the container
//! duration in seconds on a single line.

use std::path::Path;

use clipsplit_core::{Error, Result};

use crate::tools::ToolRegistry;

/// Arguments that make ffprobe print only the duration.
pub const DURATION_ARGS: &[&str] = &[
    "-v",
    "error",
    "-show_entries",
    "format=duration",
    "-of",
    "default=noprint_wrappers=1:nokey=1",
];

/// Query the duration of a media file, in seconds.
///
/// # Errors
///
/// - [`Error::FileNotFound`] if `path` does not exist.
/// - [`Error::Tool`] if ffprobe is missing, fails, or reports an error.
/// - [`Error::Probe`] if ffprobe prints no usable duration.
pub async fn probe_duration(tools: &ToolRegistry, path: &Path) -> Result<f64> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let ffprobe = tools.require("ffprobe")?;
    let mut cmd = ffprobe.command();
    cmd.args(DURATION_ARGS.iter().copied());
    cmd.arg(path.to_string_lossy().as_ref());

    let line = cmd.first_line().await?.ok_or_else(|| {
        Error::Probe(format!("ffprobe printed no duration for {}", path.display()))
    })?;
    let duration = parse_duration(&line)?;

    tracing::info!("{}: duration {duration}s", path.display());
    Ok(duration)
}

/// Parse ffprobe's duration line.
///
/// Streams without a container duration print `N/A`; that, like any other
/// non-numeric, negative or non-finite value, is a probe error.
pub fn parse_duration(line: &str) -> Result<f64> {
    let trimmed = line.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::Probe(format!("unexpected ffprobe duration '{trimmed}'")))?;

    if !value.is_finite() || value < 0.0 {
        return Err(Error::Probe(format!("invalid duration '{trimmed}'")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipsplit_core::config::ToolsConfig;

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_duration("1000.000000").unwrap(), 1000.0);
        assert_eq!(parse_duration(" 12.5\n").unwrap(), 12.5);
        assert_eq!(parse_duration("0").unwrap(), 0.0);
    }

    #[test]
    fn rejects_not_available() {
        let err = parse_duration("N/A").unwrap_err();
        assert!(matches!(err, Error::Probe(_)));
        assert!(err.to_string().contains("N/A"));
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(parse_duration("-1").is_err());
        assert!(parse_duration("inf").is_err());
        assert!(parse_duration("NaN").is_err());
    }

    #[tokio::test]
    async fn missing_file_is_reported_before_running_ffprobe() {
        let registry = ToolRegistry::discover(&ToolsConfig::default());
        let err = probe_duration(&registry, Path::new("/nonexistent/talk.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
