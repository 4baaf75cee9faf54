//! Configuration management for RAX Gallery
//!
//! Layers built-in defaults, an optional `config.toml` and `RAX_GALLERY_*`
//! environment overrides into a single [`AppConfig`].

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Prefix for environment overrides, e.g. `RAX_GALLERY_MAX_CLIENTS`.
const ENV_PREFIX: &str = "RAX_GALLERY";

/// Complete application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// IP address the UI host listens on
    pub bind_address: String,

    /// Port the UI host listens on. 0 picks an ephemeral port.
    pub port: u16,

    /// CSV file holding the `name,password` credential table
    pub users_file: String,

    /// Maximum concurrent sessions
    pub max_clients: usize,

    /// Maximum length of a single command line, in bytes
    pub max_command_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 2121,
            users_file: "users.csv".to_string(),
            max_clients: 10,
            max_command_length: 512,
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from the given TOML file (if present) with environment overrides
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = AppConfig::default();

        let settings = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("users_file", defaults.users_file)?
            .set_default("max_clients", defaults.max_clients as i64)?
            .set_default("max_command_length", defaults.max_command_length as i64)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.users_file.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "users_file cannot be empty".into(),
            ));
        }

        if self.max_clients == 0 {
            return Err(config::ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the credential table location as PathBuf
    pub fn users_file_path(&self) -> PathBuf {
        PathBuf::from(&self.users_file)
    }
}
