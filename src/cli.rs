use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clipsplit")]
#[command(author, version, about = "Split media files into overlapping clips with ffmpeg")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Chunking overrides shared by `split` and `plan`.
#[derive(Args, Debug, Clone, Default)]
pub struct ChunkArgs {
    /// Length of each clip in minutes (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    pub clip_minutes: Option<f64>,

    /// Seconds of overlap between consecutive clips (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    pub overlap: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a media file into overlapping clips
    Split {
        /// Media file to split
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        chunk: ChunkArgs,

        /// Directory for the clips (defaults to the input file's folder)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Number of ffmpeg processes to run at once
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Show the clips that would be written without running ffmpeg
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the clip ranges for a file or a duration
    Plan {
        /// Media file to probe for its duration
        #[arg(required_unless_present = "duration")]
        input: Option<PathBuf>,

        /// Duration in seconds (instead of probing a file)
        #[arg(long, conflicts_with = "input", allow_negative_numbers = true)]
        duration: Option<f64>,

        #[command(flatten)]
        chunk: ChunkArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the duration of a media file in seconds
    Duration {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that ffmpeg and ffprobe are available
    CheckTools {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Write a config file containing the default settings
    InitConfig {
        /// Where to write the config
        #[arg(default_value = "clipsplit.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}
