//! Settings resolution: defaults, then the RON file, then CLI flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use lexvis_engine::ClientSettings;
use lexvis_logging::{lexvis_info, parse_level};
use log::LevelFilter;
use serde::Deserialize;

use crate::cli::Cli;

const DEFAULT_CONFIG_FILENAME: &str = "lexvis.ron";
const DEFAULT_LOG_FILENAME: &str = "lexvis.log";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct FileConfig {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_response_bytes: Option<u64>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client: ClientSettings,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// File the settings were read from, if any.
    pub source: Option<PathBuf>,
}

pub fn resolve(cli: &Cli) -> anyhow::Result<Settings> {
    let (file, source) = match cli.config.as_deref() {
        Some(path) => (load_file_config(path)?, Some(path.to_path_buf())),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
            if default_path.is_file() {
                (load_file_config(&default_path)?, Some(default_path))
            } else {
                (FileConfig::default(), None)
            }
        }
    };
    merge(cli, file, source)
}

fn load_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ron::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn merge(cli: &Cli, file: FileConfig, source: Option<PathBuf>) -> anyhow::Result<Settings> {
    let defaults = ClientSettings::default();

    let request_timeout_secs = cli.timeout_secs.or(file.request_timeout_secs);
    let connect_timeout_secs = cli.connect_timeout_secs.or(file.connect_timeout_secs);
    if request_timeout_secs == Some(0) || connect_timeout_secs == Some(0) {
        bail!("timeouts must be at least one second");
    }

    let client = ClientSettings {
        base_url: cli
            .server
            .clone()
            .or(file.server_url)
            .unwrap_or(defaults.base_url),
        connect_timeout: connect_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.connect_timeout),
        request_timeout: request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout),
        max_response_bytes: file
            .max_response_bytes
            .unwrap_or(defaults.max_response_bytes),
    };

    let log_level = match cli.log_level.as_deref().or(file.log_level.as_deref()) {
        Some(name) => match parse_level(name) {
            Some(level) => level,
            None => bail!("unknown log level {name:?}"),
        },
        None => LevelFilter::Info,
    };

    let log_file = cli
        .log_file
        .clone()
        .or(file.log_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILENAME));

    Ok(Settings {
        client,
        log_level,
        log_file,
        source,
    })
}

impl Settings {
    pub fn log_summary(&self) {
        lexvis_info!(
            "Settings: server={} request_timeout={:?} connect_timeout={:?} max_response_bytes={} source={:?}",
            self.client.base_url,
            self.client.request_timeout,
            self.client.connect_timeout,
            self.client.max_response_bytes,
            self.source
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let settings = merge(&Cli::default(), FileConfig::default(), None).unwrap();
        assert_eq!(settings.client, ClientSettings::default());
        assert_eq!(settings.log_level, LevelFilter::Info);
        assert_eq!(settings.log_file, PathBuf::from("lexvis.log"));
    }

    #[test]
    fn file_values_override_defaults_and_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexvis.ron");
        fs::write(
            &path,
            r#"(
                server_url: Some("http://file:1"),
                request_timeout_secs: Some(5),
                max_response_bytes: Some(1024),
                log_level: Some("debug"),
            )"#,
        )
        .unwrap();

        let cli = Cli {
            config: Some(path.clone()),
            server: Some("http://flag:2".to_string()),
            ..Cli::default()
        };
        let settings = resolve(&cli).unwrap();

        assert_eq!(settings.client.base_url, "http://flag:2");
        assert_eq!(settings.client.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.client.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.client.max_response_bytes, 1024);
        assert_eq!(settings.log_level, LevelFilter::Debug);
        assert_eq!(settings.source, Some(path));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(server_url: 42").unwrap();

        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };
        let err = resolve(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = Cli {
            timeout_secs: Some(0),
            ..Cli::default()
        };
        assert!(merge(&cli, FileConfig::default(), None).is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let cli = Cli {
            log_level: Some("chatty".to_string()),
            ..Cli::default()
        };
        assert!(merge(&cli, FileConfig::default(), None).is_err());
    }
}
