//! Shared test harness for integration tests.
//!
//! Provides [`FakeTools`], a temporary directory holding stand-in `ffprobe`
//! and `ffmpeg` shell scripts plus a media file to split. The stand-in
//! ffmpeg writes its argument list into the output file it is asked to
//! create, so tests can inspect exactly what would have been run.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use clipsplit::config::Config;
use tempfile::TempDir;

/// ffmpeg stand-in recording its arguments into the output file.
pub const RECORDING_FFMPEG: &str = r#"for last; do :; done
printf '%s\n' "$*" > "$last""#;

pub struct FakeTools {
    pub dir: TempDir,
    pub ffprobe: PathBuf,
    pub ffmpeg: PathBuf,
    pub input: PathBuf,
}

impl FakeTools {
    /// Tools reporting `duration` seconds for the input and recording ffmpeg calls.
    pub fn with_duration(duration: &str) -> Self {
        Self::new(&format!("echo {duration}"), RECORDING_FFMPEG)
    }

    /// Tools running the given script bodies.
    pub fn new(ffprobe: &str, ffmpeg: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).expect("failed to create bin dir");

        let ffprobe = write_script(&bin, "ffprobe", ffprobe);
        let ffmpeg = write_script(&bin, "ffmpeg", ffmpeg);

        let input = dir.path().join("talk.mp3");
        fs::write(&input, b"not really media").expect("failed to write input");

        Self {
            dir,
            ffprobe,
            ffmpeg,
            input,
        }
    }

    /// Default config pointing at the stand-in tools.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.tools.ffprobe_path = Some(self.ffprobe.clone());
        config.tools.ffmpeg_path = Some(self.ffmpeg.clone());
        config.tools.timeout_secs = 30;
        config
    }

    /// Write a TOML config file for the stand-in tools with extra `[split]` lines.
    pub fn write_config(&self, split_section: &str) -> PathBuf {
        let path = self.dir.path().join("clipsplit.toml");
        fs::write(
            &path,
            format!(
                "[split]\n{split_section}\n\n[tools]\nffprobe_path = {:?}\nffmpeg_path = {:?}\ntimeout_secs = 30\n",
                self.ffprobe.display().to_string(),
                self.ffmpeg.display().to_string(),
            ),
        )
        .expect("failed to write config");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Write an executable shell script named `name` into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("failed to write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("failed to make script executable");
    path
}
