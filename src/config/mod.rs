pub use clipsplit_core::config::*;

mod persist;

pub use persist::save_config;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let config = read_config(path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    let config = find_config(custom_path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config like [`load_config_or_default`], applying command-line
/// overrides before anything is validated.
///
/// Chunking settings are not checked here: the planner reports them as
/// "nothing to split" once the overrides are in place.
pub fn load_config_with_overrides(
    custom_path: Option<&Path>,
    overrides: impl FnOnce(&mut Config),
) -> Result<Config> {
    let mut config = find_config(custom_path)?;
    overrides(&mut config);
    check_settings(&config)?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

fn find_config(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return read_config(path);
    }

    // Try default locations
    let default_paths = [
        "./clipsplit.toml",
        "~/.config/clipsplit/config.toml",
        "/etc/clipsplit/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {}", path.display());
            return read_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
///
/// Settings the splitter cannot run with are errors; everything else is
/// logged as a warning.
pub fn validate_config(config: &Config) -> Result<()> {
    config
        .split
        .chunk()
        .validate()
        .context("Invalid [split] settings")?;

    check_settings(config)
}

fn check_settings(config: &Config) -> Result<()> {
    if config.split.jobs == 0 {
        anyhow::bail!("split.jobs must be at least 1");
    }

    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_split_section() {
        let config: Config = toml::from_str(
            r#"
[split]
clip_duration_minutes = 30
clip_overlap_seconds = 15.5
jobs = 2
output_dir = "/tmp/clips"
"#,
        )
        .unwrap();
        assert_eq!(config.split.clip_duration_minutes, 30.0);
        assert_eq!(config.split.clip_overlap_seconds, 15.5);
        assert_eq!(config.split.jobs, 2);
        assert_eq!(
            config.split.output_dir.as_deref(),
            Some(Path::new("/tmp/clips"))
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.split.clip_duration_minutes, 10.0);
        assert_eq!(config.tools.timeout_secs, 3600);
    }

    #[test]
    fn overlap_longer_than_clip_is_rejected() {
        let mut config = Config::default();
        config.split.clip_duration_minutes = 1.0;
        config.split.clip_overlap_seconds = 60.0;
        let err = validate_config(&config).unwrap_err();
        assert!(format!("{err:#}").contains("shorter than the clip length"));
    }

    #[test]
    fn zero_jobs_is_rejected() {
        let mut config = Config::default();
        config.split.jobs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn overrides_replace_bad_chunking_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clipsplit.toml");
        std::fs::write(
            &path,
            "[split]\nclip_duration_minutes = 1\nclip_overlap_seconds = 90\n",
        )
        .unwrap();

        assert!(load_config(&path).is_err());

        let config = load_config_with_overrides(Some(&path), |c| {
            c.split.clip_duration_minutes = 10.0;
            c.split.clip_overlap_seconds = 0.0;
        })
        .unwrap();
        assert_eq!(config.split.clip_duration_minutes, 10.0);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn overrides_leave_chunking_to_the_planner() {
        let config = load_config_with_overrides(None, |c| {
            c.split.clip_duration_minutes = 0.0;
        })
        .unwrap();
        assert!(config.split.chunk().validate().is_err());
    }

    #[test]
    fn overrides_still_reject_zero_jobs() {
        assert!(load_config_with_overrides(None, |c| c.split.jobs = 0).is_err());
    }
}
