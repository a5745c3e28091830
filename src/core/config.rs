//! Configuration management

use clap::{Parser, Subcommand};
use config::{Config as ConfigBuilder, ConfigError as BuilderError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid portal configuration: {0}")]
    InvalidPortal(String),

    #[error("Invalid routing configuration: {0}")]
    InvalidRouting(String),

    #[error("Invalid logging configuration: {0}")]
    InvalidLogging(String),

    #[error("Invalid storage configuration: {0}")]
    InvalidStorage(String),

    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

impl From<BuilderError> for ConfigError {
    fn from(err: BuilderError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

impl From<ConfigError> for crate::core::error::PortalError {
    fn from(err: ConfigError) -> Self {
        crate::core::error::PortalError::ConfigError(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub portal: PortalConfig,
    pub routing: RoutingConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration with precedence: CLI args > Environment variables > Config file > Defaults
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        // Build configuration with proper precedence
        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults (lowest priority)
        builder = set_defaults(builder)?;

        // 2. Load from config file if specified (medium priority)
        if let Some(config_path) = &args.config {
            if !config_path.exists() {
                return Err(ConfigError::FileNotFound(config_path.display().to_string()));
            }
            builder = builder.add_source(File::from(config_path.as_path()));
        }

        // 3. Override with environment variables (higher priority)
        // Environment variables are prefixed with PORTAL_ and use __ for nesting
        // Example: PORTAL_PORTAL__BASE_URL=https://portal.example.com
        builder = builder.add_source(
            Environment::with_prefix("PORTAL")
                .separator("__")
                .try_parsing(true),
        );

        // 4. Override with CLI arguments (highest priority)
        if let Some(base_url) = &args.base_url {
            builder = builder.set_override("portal.base_url", base_url.clone())?;
        }
        if let Some(master) = &args.master_username {
            builder = builder.set_override("routing.master_username", master.clone())?;
        }
        if let Some(log_level) = &args.log_level {
            builder = builder.set_override("logging.level", log_level.clone())?;
        }

        // Build and deserialize configuration
        let config: Config = builder.build()?.try_deserialize()?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let config: Config = set_defaults(ConfigBuilder::builder())?
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.portal.validate()?;
        self.routing.validate()?;
        self.logging.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}

fn set_defaults(
    builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(builder
        .set_default("portal.base_url", "http://127.0.0.1:8080")?
        .set_default("portal.login_path", "/auth/login")?
        .set_default("portal.request_timeout", 30)?
        .set_default("routing.master_username", "adm.wellington")?
        .set_default("routing.navigation_delay_ms", 500)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stdout")?
        .set_default("storage.data_dir", default_data_dir().display().to_string())?)
}

/// Default directory for client-side state such as the remembered username
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("portal-session"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// Command-line interface for the portal session client
#[derive(Debug, Parser)]
#[command(name = "portal-session")]
#[command(about = "Portal session bootstrap client", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Portal base URL
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Master account username override
    #[arg(long, value_name = "USERNAME", global = true)]
    pub master_username: Option<String>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Top-level subcommands
#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Authenticate against the portal and print the post-login destination
    Login {
        /// Username (prompted interactively when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Do not remember the username for the next login
        #[arg(long)]
        no_remember: bool,
    },

    /// Clear the remembered username
    Forget,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    pub login_path: String,
    pub request_timeout: u64, // seconds
}

impl PortalConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidPortal(format!("base_url: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidPortal(
                "base_url must use http or https".to_string(),
            ));
        }

        if !self.login_path.starts_with('/') {
            return Err(ConfigError::InvalidPortal(
                "login_path must start with '/'".to_string(),
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidPortal(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    pub master_username: String,
    pub navigation_delay_ms: u64, // zero disables the delay
}

impl RoutingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.master_username.trim().is_empty() {
            return Err(ConfigError::InvalidRouting(
                "master_username cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Delay applied between the success notification and navigation
    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
    pub log_file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "level must be one of: {:?}",
                valid_levels
            )));
        }

        let valid_formats = ["json", "text"];
        if !valid_formats.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "format must be one of: {:?}",
                valid_formats
            )));
        }

        let valid_outputs = ["stdout", "file"];
        if !valid_outputs.contains(&self.output.as_str()) {
            return Err(ConfigError::InvalidLogging(format!(
                "output must be one of: {:?}",
                valid_outputs
            )));
        }

        if self.output == "file" && self.log_file.is_none() {
            return Err(ConfigError::InvalidLogging(
                "log_file must be specified when output is 'file'".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidStorage(
                "data_dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> Config {
        set_defaults(ConfigBuilder::builder())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_pass_validation() {
        let config = default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.routing.master_username, "adm.wellington");
        assert_eq!(config.portal.login_path, "/auth/login");
        assert_eq!(config.routing.navigation_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_empty_master_username() {
        let mut config = default_config();
        config.routing.master_username = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRouting(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let mut config = default_config();
        config.portal.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPortal(_))
        ));

        config.portal.base_url = "ftp://portal.example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPortal(_))
        ));
    }

    #[test]
    fn test_rejects_zero_request_timeout() {
        let mut config = default_config();
        config.portal.request_timeout = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPortal(_))
        ));
    }

    #[test]
    fn test_zero_navigation_delay_is_allowed() {
        let mut config = default_config();
        config.routing.navigation_delay_ms = 0;
        assert!(config.validate().is_ok());
        assert!(config.routing.navigation_delay().is_zero());
    }

    #[test]
    fn test_file_output_requires_log_file() {
        let mut config = default_config();
        config.logging.output = "file".to_string();
        config.logging.log_file = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogging(_))
        ));
    }
}
