use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use linkdrop_backend::BackendSettings;
use linkdrop_core::DEFAULT_ORIGIN;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "linkdrop.ron";
pub(crate) const ORIGIN_ENV: &str = "LINKDROP_BACKEND_ORIGIN";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Settings read from `linkdrop.ron`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub backend_origin: String,
    pub connect_timeout_secs: u64,
    pub health_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub download_timeout_secs: u64,
    pub download_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            backend_origin: DEFAULT_ORIGIN.to_string(),
            connect_timeout_secs: backend.connect_timeout.as_secs(),
            health_timeout_secs: backend.health_timeout.as_secs(),
            request_timeout_secs: backend.request_timeout.as_secs(),
            download_timeout_secs: backend.download_timeout.as_secs(),
            download_dir: backend.download_dir,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            health_timeout: Duration::from_secs(self.health_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            download_timeout: Duration::from_secs(self.download_timeout_secs),
            download_dir: self.download_dir.clone(),
        }
    }

    /// A non-blank override replaces the configured origin.
    pub fn apply_origin_override(&mut self, value: Option<String>) {
        if let Some(origin) = value.filter(|origin| !origin.trim().is_empty()) {
            self.backend_origin = origin.trim().to_string();
        }
    }
}

/// Loads `{dir}/linkdrop.ron`. A missing file yields the defaults.
pub(crate) fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path,
        message: err.to_string(),
    })
}
