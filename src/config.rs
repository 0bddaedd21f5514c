//! Client configuration
//!
//! Read from YAML, by default `<config dir>/pass/config.yaml`:
//!
//! ```yaml
//! web_id: https://alice.example/profile/card#me
//! pod_url: https://alice.example/      # optional, discovered when absent
//! access_token: ...                   # or PASS_ACCESS_TOKEN
//! state_db: /home/alice/.local/share/pass/state.db
//! log_level: info
//! timeout_secs: 30
//! ```

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides `access_token`
pub const ACCESS_TOKEN_ENV: &str = "PASS_ACCESS_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassConfig {
    #[serde(default)]
    pub web_id: Option<String>,
    #[serde(default)]
    pub pod_url: Option<String>,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub state_db: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Cached collections older than this are refetched; unset keeps them
    /// until the process exits
    #[serde(default)]
    pub cache_stale_secs: Option<u64>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            web_id: None,
            pod_url: None,
            access_token: None,
            state_db: None,
            log_level: default_log_level(),
            timeout_secs: default_timeout_secs(),
            cache_stale_secs: None,
        }
    }
}

impl PassConfig {
    /// `<config dir>/pass/config.yaml`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pass").join("config.yaml"))
    }

    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Load `path` if given, else the default file if it exists, else
    /// defaults. An explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load(&default)?,
                _ => Self::default(),
            },
        };
        config.apply_token(std::env::var(ACCESS_TOKEN_ENV).ok());
        Ok(config)
    }

    /// A non-empty token from the environment wins over the file
    pub fn apply_token(&mut self, env_token: Option<String>) {
        if let Some(token) = env_token.filter(|t| !t.is_empty()) {
            self.access_token = Some(token);
        }
    }

    pub fn state_db_path(&self) -> PathBuf {
        self.state_db.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
                .join("pass")
                .join("state.db")
        })
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [("web_id", &self.web_id), ("pod_url", &self.pod_url)] {
            if let Some(url) = value {
                Url::parse(url)
                    .map_err(|e| ConfigError::Invalid(format!("{} '{}': {}", field, url, e)))?;
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }
}
