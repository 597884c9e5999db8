use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use ragdesk_engine::GatewaySettings;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "ragdesk.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub connect_timeout_secs: u64,
    /// Unset waits for the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gateway = GatewaySettings::default();
        Self {
            api_url: gateway.base_url,
            connect_timeout_secs: gateway.connect_timeout.as_secs(),
            request_timeout_secs: gateway.request_timeout.map(|timeout| timeout.as_secs()),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./ragdesk.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn gateway_settings(&self) -> GatewaySettings {
        GatewaySettings {
            base_url: self.api_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Configured level raised by `verbosity`; unknown names fall back to `Info`.
    pub fn log_level(&self, verbosity: u8) -> LevelFilter {
        let base = ragdesk_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info);
        ragdesk_logging::raise_level(base, verbosity)
    }
}

/// Reads a RON config file. A missing file yields `Ok(None)`.
pub(crate) fn load_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let loaded = load_config(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(
                api_url: "http://rag.internal:9000/api",
                request_timeout_secs: Some(120),
                log_destination: Both,
            )"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap().expect("config");

        assert_eq!(config.api_url, "http://rag.internal:9000/api");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.connect_timeout_secs, 10);
        let settings = config.gateway_settings();
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(120)));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_file_reports_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILENAME);
        fs::write(&path, "(api_url: 42)").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn defaults_match_gateway_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.gateway_settings().request_timeout, None);
        assert_eq!(config.log_level(0), LevelFilter::Info);
        assert_eq!(config.log_level(2), LevelFilter::Trace);
    }
}
