//! Client configuration
//!
//! TOML-backed configuration for the API endpoint, credential storage and logging.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ErrorContext, IntervueError, IntervueResult};
use crate::logging::LoggingConfig;

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL all request paths are resolved against
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

/// Credential storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the persisted token and user entries
    pub data_dir: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            storage: StorageSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            // The development backend the original deployment proxies /api to
            base_url: "http://localhost:5000/api".to_string(),
            timeout_seconds: 30,
            user_agent: "intervue/0.1".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: ".intervue".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> IntervueResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IntervueError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: ClientConfig = toml::from_str(&content).map_err(|e| IntervueError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> IntervueResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| IntervueError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| IntervueError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> IntervueResult<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            IntervueError::config(
                format!("Invalid api.base_url '{}': {}", self.api.base_url, e),
                "config",
            )
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(IntervueError::config(
                "api.timeout_seconds must be greater than zero",
                "config",
            ));
        }

        if self.storage.data_dir.trim().is_empty() {
            return Err(IntervueError::config(
                "storage.data_dir must not be empty",
                "config",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intervue.toml");

        let mut config = ClientConfig::default();
        config.api.base_url = "https://hiring.example.com/api".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = ClientConfig::from_file(&path).unwrap();
        assert_eq!(loaded.api.base_url, "https://hiring.example.com/api");
        assert_eq!(loaded.api.timeout_seconds, config.api.timeout_seconds);
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = ClientConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "api = [not toml").unwrap();
        assert!(ClientConfig::from_file(&path).is_err());
    }
}
