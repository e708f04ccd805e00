//! Split orchestration: probe, plan, extract.

use std::path::Path;

use clipsplit_av::{extract_segment, probe_duration, ToolRegistry};
use clipsplit_core::config::SplitConfig;
use clipsplit_core::{compute_ranges, Error, MediaFile, Range, Result};
use futures::{stream, StreamExt, TryStreamExt};

/// Splits media files according to a [`SplitConfig`].
#[derive(Debug, Clone)]
pub struct Splitter {
    tools: ToolRegistry,
    settings: SplitConfig,
}

impl Splitter {
    pub fn new(tools: ToolRegistry, settings: SplitConfig) -> Self {
        Self { tools, settings }
    }

    pub fn settings(&self) -> &SplitConfig {
        &self.settings
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Clip windows for a file of `duration` seconds.
    ///
    /// Invalid chunking settings yield [`clipsplit_core::Error::Plan`].
    pub fn plan(&self, duration: f64) -> Result<Vec<Range>> {
        Ok(compute_ranges(duration, &self.settings.chunk())?)
    }

    /// Probe `path` and describe it as the source of a split.
    pub async fn probe(&self, path: &Path) -> Result<MediaFile> {
        let duration = probe_duration(&self.tools, path).await?;
        MediaFile::from_path(path, duration)
    }

    /// Descriptors of the segments [`split`](Self::split) would produce,
    /// without running ffmpeg.
    pub fn preview(&self, source: &MediaFile) -> Result<Vec<MediaFile>> {
        let output_dir = self.settings.output_dir.as_deref();
        Ok(self
            .plan(source.duration)?
            .iter()
            .enumerate()
            .map(|(i, range)| source.segment(i + 1, range, output_dir))
            .collect())
    }

    /// Extract every planned segment of `source`.
    ///
    /// Up to `jobs` ffmpeg processes run at once; the returned segments are
    /// always in range order. The first failing segment fails the whole
    /// split and stops the remaining extractions.
    pub async fn split(&self, source: &MediaFile) -> Result<Vec<MediaFile>> {
        let ranges = self.plan(source.duration)?;
        let output_dir = self.settings.output_dir.as_deref();
        if let Some(dir) = output_dir {
            let existing = tokio::fs::metadata(dir).await.ok();
            if existing.is_some_and(|m| !m.is_dir()) {
                return Err(Error::Validation(format!(
                    "output directory {} is not a directory",
                    dir.display()
                )));
            }
            tokio::fs::create_dir_all(dir).await?;
        }

        let jobs = self.settings.jobs.max(1);
        tracing::info!(
            "splitting {} into {} segment(s), {} at a time",
            source.path.display(),
            ranges.len(),
            jobs
        );

        stream::iter(ranges.iter().enumerate())
            .map(|(i, range)| extract_segment(&self.tools, source, i + 1, range, output_dir))
            .buffered(jobs)
            .try_collect()
            .await
    }

    /// Probe `path` and extract all of its segments.
    pub async fn split_file(&self, path: &Path) -> Result<Vec<MediaFile>> {
        let source = self.probe(path).await?;
        self.split(&source).await
    }
}
