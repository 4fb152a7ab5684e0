use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sync::SubmitMode;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Remote submission settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SyncConfig {
    /// Submit through the relay or directly to the spreadsheet
    #[serde(default)]
    pub mode: SubmitMode,
    /// Relay endpoint (e.g. "http://localhost:8080/submit")
    pub relay_url: Option<String>,
    /// Spreadsheet web app URL used in direct mode
    pub backend_url: Option<String>,
    /// Shared secret sent with every call
    #[serde(skip_serializing)]
    pub secret: Option<String>,
}

impl SyncConfig {
    /// The URL submissions go to in the selected mode.
    pub fn endpoint(&self) -> Option<&str> {
        match self.mode {
            SubmitMode::Relay => self.relay_url.as_deref(),
            SubmitMode::Direct => self.backend_url.as_deref(),
        }
    }

    /// Returns true if an endpoint is set for the selected mode
    pub fn is_configured(&self) -> bool {
        self.endpoint().is_some()
    }
}

/// Client configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding the local cache
    pub data_dir: ConfigValue<PathBuf>,
    /// Code that unlocks admin mode
    #[serde(skip_serializing)]
    pub admin_code: ConfigValue<Option<String>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub sync: SyncConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    admin_code: Option<String>,
    sync: Option<SyncConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut admin_code = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;
        let mut sync = SyncConfig::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(code) = file_config.admin_code {
                admin_code = ConfigValue::new(Some(code), ConfigSource::File);
            }
            if let Some(sync_config) = file_config.sync {
                sync = sync_config;
            }
        }

        if let Ok(dir) = std::env::var("RSVP_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(code) = std::env::var("RSVP_ADMIN_CODE") {
            admin_code = ConfigValue::new(Some(code), ConfigSource::Environment);
        }
        if let Ok(mode) = std::env::var("RSVP_SUBMIT_MODE") {
            sync.mode = mode
                .parse()
                .map_err(|e| ConfigError::InvalidValue("RSVP_SUBMIT_MODE", e))?;
        }
        if let Ok(url) = std::env::var("RSVP_RELAY_URL") {
            sync.relay_url = Some(url);
        }
        if let Ok(url) = std::env::var("RSVP_BACKEND_URL") {
            sync.backend_url = Some(url);
        }
        if let Ok(secret) = std::env::var("RSVP_SECRET") {
            sync.secret = Some(secret);
        }

        Ok(Self {
            data_dir,
            admin_code,
            config_file,
            sync,
        })
    }

    /// Default config directory (platform-specific config dir + wedding-rsvp)
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wedding-rsvp")
    }

    /// Default data directory (platform-specific data dir + wedding-rsvp)
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wedding-rsvp")
    }

    /// Default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(var, e) => write!(f, "Invalid value for {}: {}", var, e),
        }
    }
}

impl std::error::Error for ConfigError {}
