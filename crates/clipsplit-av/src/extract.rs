//! Segment extraction with ffmpeg `-c copy`.

use std::path::Path;

use clipsplit_core::{MediaFile, Range, Result};

use crate::tools::ToolRegistry;

/// ffmpeg arguments that copy `range` of `input` into `output`.
///
/// Streams are copied without re-encoding and an existing output is
/// overwritten.
pub fn extract_args(input: &Path, range: &Range, output: &Path) -> Vec<String> {
    vec![
        "-v".into(),
        "error".into(),
        "-y".into(),
        "-i".into(),
        input.to_string_lossy().to_string(),
        "-ss".into(),
        range.start.to_string(),
        "-to".into(),
        range.end.to_string(),
        "-c".into(),
        "copy".into(),
        output.to_string_lossy().to_string(),
    ]
}

/// Extract the `seq`-th (1-based) segment of `source` covering `range`.
///
/// The segment is written to `output_dir` (or next to the source) as
/// `<stem>-<seq>.<ext>` and its descriptor is returned.
///
/// # Errors
///
/// Returns [`clipsplit_core::Error::Tool`] if ffmpeg is missing, exits with a
/// non-zero status, or reports an error on stderr. There is no retry.
pub async fn extract_segment(
    tools: &ToolRegistry,
    source: &MediaFile,
    seq: usize,
    range: &Range,
    output_dir: Option<&Path>,
) -> Result<MediaFile> {
    let ffmpeg = tools.require("ffmpeg")?;
    let segment = source.segment(seq, range, output_dir);

    tracing::info!(
        "segment {seq}: {} [{range}] -> {}",
        source.filename,
        segment.path.display()
    );

    let mut cmd = ffmpeg.command();
    cmd.args(extract_args(&source.path, range, &segment.path));
    if let Some(line) = cmd.first_line().await? {
        tracing::debug!("ffmpeg: {line}");
    }

    Ok(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn args_follow_ffmpeg_copy_layout() {
        let args = extract_args(
            Path::new("/media/talk.mp3"),
            &Range::new(540.0, 1000.0),
            Path::new("/media/talk-2.mp3"),
        );
        assert_eq!(
            args,
            vec![
                "-v", "error", "-y", "-i", "/media/talk.mp3", "-ss", "540", "-to", "1000", "-c",
                "copy", "/media/talk-2.mp3",
            ]
        );
    }

    #[test]
    fn paths_with_spaces_stay_single_arguments() {
        let args = extract_args(
            Path::new("/media/My Talk.mp3"),
            &Range::new(0.0, 12.5),
            &PathBuf::from("/media/out dir/My Talk-1.mp3"),
        );
        assert_eq!(args[4], "/media/My Talk.mp3");
        assert_eq!(args[8], "12.5");
        assert_eq!(args[11], "/media/out dir/My Talk-1.mp3");
    }
}
