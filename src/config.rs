//! Run settings: defaults, an optional YAML file, and CLI overrides.
//!
//! Precedence is CLI flag (or its environment variable), then config file,
//! then built-in default.
//!
//! ```yaml
//! title: Programming Languages Report
//! subtitle: Popularity, Salaries and Learning Difficulty
//! show_logo: true
//! show_date: true
//! timeout_secs: 60
//! heartbeat_secs: 5
//! chrome_path: /usr/bin/chromium
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::report::HeaderOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_HEARTBEAT_SECS: u64 = 5;

/// Contents of the optional YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub show_logo: Option<bool>,
    pub show_date: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub heartbeat_secs: Option<u64>,
    pub chrome_path: Option<PathBuf>,
}

/// Load a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    info!("Loaded configuration");
    Ok(config)
}

fn parse_config(raw: &str) -> Result<FileConfig, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(raw)
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub header: HeaderOptions,
    pub timeout: Duration,
    pub heartbeat: Duration,
    pub chrome_path: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let show_logo = if cli.no_logo { Some(false) } else { file.show_logo };
        let show_date = if cli.no_date { Some(false) } else { file.show_date };
        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let heartbeat_secs = cli
            .heartbeat_secs
            .or(file.heartbeat_secs)
            .unwrap_or(DEFAULT_HEARTBEAT_SECS);

        Self {
            header: HeaderOptions {
                title: cli.title.clone().or(file.title),
                subtitle: cli.subtitle.clone().or(file.subtitle),
                show_logo,
                show_date,
            },
            timeout: Duration::from_secs(timeout_secs.max(1)),
            heartbeat: Duration::from_secs(heartbeat_secs.max(1)),
            chrome_path: cli.chrome_path.clone().or(file.chrome_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;

    // Built by hand so RANKINGS_* and CHROME_PATH in the test environment
    // cannot leak into the env-backed options.
    fn bare_cli() -> Cli {
        Cli {
            output_dir: PathBuf::from("reports"),
            format: Format::Markdown,
            config: None,
            timeout_secs: None,
            heartbeat_secs: None,
            title: None,
            subtitle: None,
            no_logo: false,
            no_date: false,
            logo_path: "assets/logo.png".to_string(),
            chrome_path: None,
        }
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
title: My Rankings
subtitle: Q3
show_logo: false
timeout_secs: 30
chrome_path: /usr/bin/chromium
"#;
        let config = parse_config(raw).unwrap();
        assert_eq!(config.title.as_deref(), Some("My Rankings"));
        assert_eq!(config.show_logo, Some(false));
        assert_eq!(config.show_date, None);
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(parse_config("titel: typo\n").is_err());
    }

    #[test]
    fn test_defaults_without_file_or_flags() {
        let settings = Settings::resolve(&bare_cli(), FileConfig::default());
        assert_eq!(settings.header.title, None);
        assert_eq!(settings.header.show_logo, None);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(settings.heartbeat, Duration::from_secs(DEFAULT_HEARTBEAT_SECS));
        assert_eq!(settings.chrome_path, None);
    }

    #[test]
    fn test_cli_chrome_path_wins() {
        let file = FileConfig {
            chrome_path: Some(PathBuf::from("/usr/bin/chromium")),
            ..FileConfig::default()
        };
        let cli = Cli {
            chrome_path: Some(PathBuf::from("/opt/chrome")),
            ..bare_cli()
        };
        let settings = Settings::resolve(&cli, file);
        assert_eq!(settings.chrome_path, Some(PathBuf::from("/opt/chrome")));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            title: Some("From file".to_string()),
            subtitle: Some("File subtitle".to_string()),
            show_logo: Some(true),
            show_date: Some(true),
            timeout_secs: Some(30),
            heartbeat_secs: Some(10),
            chrome_path: None,
        };
        let cli = Cli {
            title: Some("From CLI".to_string()),
            no_logo: true,
            timeout_secs: Some(12),
            ..bare_cli()
        };
        let settings = Settings::resolve(&cli, file);
        assert_eq!(settings.header.title.as_deref(), Some("From CLI"));
        assert_eq!(settings.header.subtitle.as_deref(), Some("File subtitle"));
        assert_eq!(settings.header.show_logo, Some(false));
        assert_eq!(settings.header.show_date, Some(true));
        assert_eq!(settings.timeout, Duration::from_secs(12));
        assert_eq!(settings.heartbeat, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_load_config_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rankings.yaml");
        tokio::fs::write(&path, "show_date: false\n").await.unwrap();
        let config = load_config(&path).await.unwrap();
        assert_eq!(config.show_date, Some(false));
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let err = load_config(Path::new("/nonexistent/rankings.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
