//! Server configuration loading.
//!
//! The service reads a small YAML file at startup with the bind address
//! and the SQLite database path. Every field has a default so a missing
//! key (or, for local development, a missing file) is not fatal.
//!
//! # Example
//!
//! ```no_run
//! use care_office::config::ServerConfig;
//!
//! let config = ServerConfig::load("./config/care-office.yaml").unwrap();
//! println!("Listening on {}", config.bind_addr);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OfficeError, OfficeResult};

/// Runtime configuration for the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address and port to bind the HTTP listener to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_database_path() -> String {
    "care-office.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_path: default_database_path(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`OfficeError::ConfigNotFound`] if the file does not exist
    /// and [`OfficeError::ConfigParseError`] if it is not valid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> OfficeResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| OfficeError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|message| OfficeError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Parses configuration from a YAML string.
    fn from_yaml_str(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.database_path, "care-office.db");
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = "bind_addr: 0.0.0.0:9000\ndatabase_path: /var/lib/care-office/data.db\n";
        let config = ServerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.database_path, "/var/lib/care-office/data.db");
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config = ServerConfig::from_yaml_str("bind_addr: 0.0.0.0:9000\n").unwrap();
        assert_eq!(config.database_path, "care-office.db");
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        assert!(ServerConfig::from_yaml_str(": not yaml [").is_err());
    }

    #[test]
    fn test_missing_file_is_config_not_found() {
        let err = ServerConfig::load("/definitely/missing.yaml").unwrap_err();
        assert!(matches!(err, OfficeError::ConfigNotFound { .. }));
    }
}
