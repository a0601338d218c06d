//! Configuration management for the VectorGo client.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (`<data dir>/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! The client is home-centric: session state (the bearer token and the
//! config file) lives in `~/.vectorgo/` unless `VECTORGO_HOME` points
//! elsewhere.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Fixed API base path, prepended to every endpoint path.
pub const API_BASE_PATH: &str = "/api";

/// File name the session token is persisted under, inside the data dir.
pub const TOKEN_FILE_NAME: &str = "token";

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// client behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the VectorGo server (no trailing `/api`)
    pub server_url: String,

    /// Directory holding the session token and the config file
    pub data_dir: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    server: Option<ServerConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            data_dir: default_data_dir(),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

/// Resolve the data directory: `VECTORGO_HOME`, else `$HOME/.vectorgo`,
/// else `.vectorgo` relative to the working directory.
fn default_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("VECTORGO_HOME") {
        return PathBuf::from(home);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".vectorgo"),
        Err(_) => PathBuf::from(".vectorgo"),
    }
}

impl AppConfig {
    /// Load configuration from the config file and environment variables.
    ///
    /// Environment variables:
    /// - `VECTORGO_HOME`: Override the data directory
    /// - `VECTORGO_CONFIG`: Path to config file
    /// - `VECTORGO_SERVER`: Server base URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// Environment variables override values from the config file.
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("VECTORGO_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            config.data_dir.join("config.yaml")
        };

        if config_path.exists() {
            tracing::debug!("Merging config file {:?}", config_path);
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(url) = std::env::var("VECTORGO_SERVER") {
            config.server_url = url;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(server) = config_file.server {
            if let Some(url) = server.url {
                result.server_url = url;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    pub fn with_overrides(
        mut self,
        server: Option<String>,
        home: Option<PathBuf>,
        config_file: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(server) = server {
            self.server_url = server;
        }

        if let Some(home) = home {
            self.data_dir = home;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Root URL of the API: server URL plus the fixed base path.
    pub fn api_root(&self) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), API_BASE_PATH)
    }

    /// Path the session token is persisted under.
    pub fn token_path(&self) -> PathBuf {
        self.data_dir.join(TOKEN_FILE_NAME)
    }

    /// Ensure the data directory exists.
    pub fn ensure_data_dir(&self) -> AppResult<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir).map_err(|e| {
                AppError::Config(format!("Failed to create data directory: {}", e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_api_root_strips_trailing_slash() {
        let mut config = AppConfig::default();
        config.server_url = "http://example.com:9000/".to_string();
        assert_eq!(config.api_root(), "http://example.com:9000/api");
    }

    #[test]
    fn test_token_path() {
        let config = AppConfig::default();
        assert!(config.token_path().ends_with(TOKEN_FILE_NAME));
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some("http://other:1234".to_string()),
            None,
            None,
            None,
            true,
            false,
        );

        assert_eq!(overridden.server_url, "http://other:1234");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "server:\n  url: http://yaml-server:8080\nlogging:\n  level: warn\n  color: false\n",
        )
        .unwrap();

        let mut config = AppConfig::default();
        let merged = config.merge_yaml(&path).unwrap();

        assert_eq!(merged.server_url, "http://yaml-server:8080");
        assert_eq!(merged.log_level, Some("warn".to_string()));
        assert!(merged.no_color);
    }
}
