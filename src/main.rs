mod cli;

use clipsplit::config::{self, Config};
use clipsplit::Splitter;
use clipsplit_av::{probe_duration, ToolRegistry};
use clipsplit_core::{MediaFile, Range};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{ChunkArgs, Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "clipsplit=debug,clipsplit_av=debug,clipsplit_core=trace".to_string()
        } else {
            "clipsplit=info,clipsplit_av=info,clipsplit_core=info".to_string()
        }
    });

    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Split {
            input,
            chunk,
            output_dir,
            jobs,
            dry_run,
            json,
        } => {
            let config = load_with_overrides(config_path, &chunk, |config| {
                if output_dir.is_some() {
                    config.split.output_dir = output_dir;
                }
                if let Some(jobs) = jobs {
                    config.split.jobs = jobs;
                }
            })?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(split_file(&input, config, dry_run, json))
        }
        Commands::Plan {
            input,
            duration,
            chunk,
            json,
        } => {
            let config = load_with_overrides(config_path, &chunk, |_| {})?;
            plan(input.as_deref(), duration, config, json)
        }
        Commands::Duration { file, json } => {
            let config = config::load_config_or_default(config_path)?;
            print_duration(&file, &config, json)
        }
        Commands::CheckTools { json } => {
            let config = config::load_config_or_default(config_path)?;
            check_tools(&config, json)
        }
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::InitConfig { path, force } => init_config(&path, force),
        Commands::Version => {
            println!("clipsplit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load the config file with chunking and any other flags from the command
/// line applied on top.
fn load_with_overrides(
    config_path: Option<&Path>,
    chunk: &ChunkArgs,
    extra: impl FnOnce(&mut Config),
) -> Result<Config> {
    config::load_config_with_overrides(config_path, |config| {
        if let Some(minutes) = chunk.clip_minutes {
            config.split.clip_duration_minutes = minutes;
        }
        if let Some(overlap) = chunk.overlap {
            config.split.clip_overlap_seconds = overlap;
        }
        extra(config);
    })
}

async fn split_file(input: &Path, config: Config, dry_run: bool, json: bool) -> Result<()> {
    let splitter = Splitter::new(ToolRegistry::discover(&config.tools), config.split);
    let source = splitter.probe(input).await?;
    tracing::debug!("Source: {:?}", source);

    let result = if dry_run {
        splitter.preview(&source)
    } else {
        tokio::select! {
            result = splitter.split(&source) => result,
            _ = tokio::signal::ctrl_c() => {
                // Dropping the split future kills the running ffmpeg processes
                anyhow::bail!("Interrupted; running ffmpeg processes were stopped");
            }
        }
    };

    let segments = match result {
        Ok(segments) => segments,
        Err(e) if e.is_unavailable() => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    if dry_run {
        println!("[DRY RUN] Would write {} clip(s):", segments.len());
    } else {
        println!("Wrote {} clip(s):", segments.len());
    }
    print_segments(&segments);

    Ok(())
}

fn print_segments(segments: &[MediaFile]) {
    for segment in segments {
        println!("  {} ({}s)", segment.path.display(), segment.duration);
    }
}

fn plan(input: Option<&Path>, duration: Option<f64>, config: Config, json: bool) -> Result<()> {
    let splitter = Splitter::new(ToolRegistry::discover(&config.tools), config.split);

    let duration = match duration {
        Some(d) => d,
        None => {
            let input = input.context("Either an input file or --duration is required")?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(probe_duration(splitter.tools(), input))?
        }
    };

    let ranges = match splitter.plan(duration) {
        Ok(ranges) => ranges,
        Err(e) if e.is_unavailable() => {
            println!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&ranges)?);
    } else {
        print_ranges(duration, &ranges);
    }

    Ok(())
}

fn print_ranges(duration: f64, ranges: &[Range]) {
    println!("Duration: {duration}s");
    println!("Clips: {}", ranges.len());
    for (i, range) in ranges.iter().enumerate() {
        println!("  {}. {} ({}s)", i + 1, range, range.duration());
    }
}

fn print_duration(file: &Path, config: &Config, json: bool) -> Result<()> {
    let tools = ToolRegistry::discover(&config.tools);
    let rt = tokio::runtime::Runtime::new()?;
    let duration = rt.block_on(probe_duration(&tools, file))?;

    if json {
        let media = MediaFile::from_path(file, duration)?;
        println!("{}", serde_json::to_string_pretty(&media)?);
    } else {
        println!("{duration}");
    }

    Ok(())
}

fn check_tools(config: &Config, json: bool) -> Result<()> {
    let tools = ToolRegistry::discover(&config.tools).check_all();

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!("Checking external tools...\n");

    let mut all_ok = true;
    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to split files.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Clip duration: {} min", config.split.clip_duration_minutes);
    println!("  Clip overlap: {}s", config.split.clip_overlap_seconds);
    println!("  Jobs: {}", config.split.jobs);
    if let Some(ref dir) = config.split.output_dir {
        println!("  Output dir: {}", dir.display());
    }
    println!("  Tool timeout: {}s", config.tools.timeout_secs);

    for warning in config.validate() {
        println!("  ! {}", warning);
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{:?} already exists; use --force to overwrite", path);
    }

    config::save_config(path, &Config::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
