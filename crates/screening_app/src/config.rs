use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use screening_core::PollSettings;
use screening_engine::{ClientSettings, SettingsError, StaticCredential, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub poll_interval_secs: u64,
    pub max_attempts: u32,
    pub request_timeout_secs: u64,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let poll = PollSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            poll_interval_secs: poll.interval.as_secs(),
            max_attempts: poll.max_attempts,
            request_timeout_secs: ClientSettings::default().request_timeout.as_secs(),
            log: LogDestination::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("no credential configured; pass --token or set SCREENING_TOKEN")]
    MissingToken,
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Reads `path`; a file that does not exist yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: AppConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    engine_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

impl AppConfig {
    /// Command-line values win over file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(token) = &cli.token {
            self.token = Some(token.clone());
        }
        if let Some(secs) = cli.poll_interval_secs {
            self.poll_interval_secs = secs;
        }
        if let Some(max_attempts) = cli.max_attempts {
            self.max_attempts = max_attempts;
        }
        if let Some(log) = cli.log {
            self.log = log;
        }
        self
    }

    pub fn client_settings(&self) -> Result<ClientSettings, ConfigError> {
        let mut settings = ClientSettings::with_base_url(&self.base_url)?;
        settings.request_timeout = Duration::from_secs(self.request_timeout_secs.max(1));
        settings.poll = PollSettings {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_attempts: self.max_attempts.max(1),
        };
        if self.poll_interval_secs == 0 {
            engine_warn!("poll_interval_secs is 0; status queries will run back to back");
        }
        Ok(settings)
    }

    pub fn credential(&self) -> Result<StaticCredential, ConfigError> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(StaticCredential::new)
            .ok_or(ConfigError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_attempts, 450);
        assert_eq!(config.poll_interval_secs, 2);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("screening.ron");
        fs::write(
            &path,
            r#"(base_url: "https://stx.example.com/", token: Some("abc"), log: both)"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.base_url, "https://stx.example.com/");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.log, LogDestination::Both);
        assert_eq!(config.max_attempts, 450);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("screening.ron");
        fs::write(&path, "(base_url: 42").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn cli_overrides_file_values() {
        let cli = Cli::try_parse_from([
            "screening_app",
            "f.tle",
            "--base-url",
            "http://localhost:8080/",
            "--token",
            "cli-token",
            "--max-attempts",
            "10",
        ])
        .unwrap();
        let config = AppConfig {
            token: Some("file-token".to_string()),
            ..AppConfig::default()
        }
        .with_overrides(&cli);

        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.token.as_deref(), Some("cli-token"));
        let settings = config.client_settings().unwrap();
        assert_eq!(settings.poll.max_attempts, 10);
        assert_eq!(settings.poll.interval, Duration::from_secs(2));
    }

    #[test]
    fn blank_token_is_missing() {
        let config = AppConfig {
            token: Some("   ".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(config.credential(), Err(ConfigError::MissingToken)));
    }
}
