//! Configuration management for the Viya Orders client
//!
//! Settings come from four layers, later ones winning:
//! 1. Default values
//! 2. Config file (`--config FILE`, or the first file found in the standard
//!    locations)
//! 3. Environment variables (a `.env` file is loaded first by `main`)
//! 4. Command-line flags

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::models::OutputFormat;
use crate::app::ClientConfig;
use crate::constants::{api, config as config_constants, env as env_constants, http};
use crate::errors::{ConfigError, ConfigResult, Result};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Base64-encoded OAuth client credentials
    pub credentials: CredentialsConfig,
    /// Where and how retrieved assets are reported
    pub output: OutputConfig,
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Base64-encoded client credentials
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CredentialsConfig {
    pub client_credentials_id: Option<String>,
    pub client_credentials_secret: Option<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// `text`/`t` or `json`/`j`
    pub format: String,
    /// Directory assets are saved into (working directory when unset)
    pub file_path: Option<PathBuf>,
    /// File name stem for saved assets (server name when unset)
    pub file_name: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            file_path: None,
            file_name: None,
        }
    }
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Scheme and host of the orders API
    pub api_base_url: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            api_base_url: api::HOST.to_string(),
            request_timeout_secs: http::DEFAULT_TIMEOUT.as_secs(),
            connect_timeout_secs: http::CONNECT_TIMEOUT.as_secs(),
        }
    }
}

impl ClientConfigToml {
    /// Convert to runtime configuration
    pub fn to_runtime_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api_base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            ..ClientConfig::default()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Settings taken from command-line flags
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub file_path: Option<PathBuf>,
    pub file_name: Option<String>,
    pub output: Option<String>,
}

/// Validated settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: CredentialsConfig,
    pub output: OutputFormat,
    pub file_path: Option<PathBuf>,
    pub file_name: Option<String>,
    pub client: ClientConfig,
    pub log_level: String,
}

impl AppConfig {
    /// Load the config file layer
    ///
    /// An explicitly given file must exist; otherwise the standard locations
    /// are searched and defaults are used when none is found.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound { path });
                }
                Some(path)
            }
            None => Self::find_config_file(),
        };

        match config_path {
            Some(path) => Self::load_from_file(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Standard config file locations, in lookup order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(config_constants::LOCAL_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(config_constants::HOME_FILE_NAME));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(
                config_dir
                    .join(config_constants::APP_DIR_NAME)
                    .join(config_constants::APP_FILE_NAME),
            );
        }
        paths
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let found = Self::search_paths().into_iter().find(|path| path.is_file());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: AppConfig =
            toml::from_str(&content).map_err(|source| ConfigError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Apply environment variable overrides from the process environment
    pub fn apply_env_vars(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    /// Apply environment variable overrides read through `lookup`
    ///
    /// Unset and empty variables leave the current value alone.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(id) = get(env_constants::CLIENT_CREDENTIALS_ID) {
            self.credentials.client_credentials_id = Some(id);
        }
        if let Some(secret) = get(env_constants::CLIENT_CREDENTIALS_SECRET) {
            self.credentials.client_credentials_secret = Some(secret);
        }
        if let Some(path) = get(env_constants::FILE_PATH) {
            self.output.file_path = Some(PathBuf::from(path));
        }
        if let Some(name) = get(env_constants::FILE_NAME) {
            self.output.file_name = Some(name);
        }
        if let Some(format) = get(env_constants::OUTPUT) {
            self.output.format = format;
        }
    }

    /// Apply command-line flag overrides
    pub fn apply_cli(&mut self, overrides: &CliOverrides) {
        if let Some(path) = &overrides.file_path {
            self.output.file_path = Some(path.clone());
        }
        if let Some(name) = overrides.file_name.as_ref().filter(|n| !n.is_empty()) {
            self.output.file_name = Some(name.clone());
        }
        if let Some(format) = &overrides.output {
            self.output.format = format.clone();
        }
    }

    /// Validate and convert to the settings used for a run
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::OutputFormat` for an unknown output format
    /// and `ConfigError::InvalidValue` if the file path is not an existing
    /// directory
    pub fn into_settings(self) -> Result<Settings> {
        let output = OutputFormat::from_str(&self.output.format)?;

        if let Some(path) = &self.output.file_path {
            if !path.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "file-path".to_string(),
                    value: path.display().to_string(),
                    reason: "The file path must be an existing directory.".to_string(),
                }
                .into());
            }
        }

        Ok(Settings {
            client: self.client.to_runtime_config(),
            credentials: self.credentials,
            output,
            file_path: self.output.file_path,
            file_name: self.output.file_name.filter(|n| !n.is_empty()),
            log_level: self.logging.level,
        })
    }
}
