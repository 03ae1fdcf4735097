// src/config/mod.rs
mod schema;

use std::path::{Path, PathBuf};

use config::{Config as ConfigLoader, FileFormat};
use tracing::{debug, info, warn};

pub use schema::{Config, GlobalConfig, ShellConfig};

use crate::error::{FlowError, FlowResult};

/// Built-in defaults, always the lowest-priority source
const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Centralized configuration handling
impl Config {
    /// Load configuration: built-in defaults, then the user file, then
    /// `TASKFLOW_<SECTION>__<KEY>` environment variables.
    pub fn load(config_path: Option<&Path>) -> FlowResult<Self> {
        debug!("Loading configuration");

        let mut config_builder = ConfigLoader::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // User-provided configuration
        if let Some(path) = config_path {
            if path.exists() {
                config_builder = config_builder.add_source(config::File::from(path));
                info!("Loading user configuration from: {}", path.display());
            } else {
                warn!("Specified configuration file not found: {}", path.display());
            }
        } else {
            let default_path = Self::get_default_config_path();
            if default_path.exists() {
                config_builder = config_builder.add_source(config::File::from(default_path.as_path()));
                debug!("Loading default configuration from: {}", default_path.display());
            } else {
                debug!("No existing configuration found, using built-in defaults");
            }
        }

        config_builder = config_builder.add_source(
            config::Environment::with_prefix("TASKFLOW")
                .prefix_separator("_")
                .separator("__"),
        );

        config_builder
            .build()
            .map_err(|e| FlowError::ConfigError(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| FlowError::ConfigError(format!("Failed to parse configuration: {}", e)))
    }

    /// Get the default configuration path
    pub fn get_default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".taskflow/config.toml")
    }

    /// Write the default configuration to `path`, or to the default location
    pub fn init(path: Option<&Path>, force: bool) -> FlowResult<PathBuf> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::get_default_config_path);

        if config_path.exists() && !force {
            return Err(FlowError::ConfigError(format!(
                "Configuration already exists at {}. Use --force to overwrite.",
                config_path.display()
            )));
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FlowError::FileError {
                path: parent.to_path_buf(),
                message: format!("Failed to create directory: {}", e),
            })?;
        }

        Config::default().save(&config_path)?;

        Ok(config_path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> FlowResult<()> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| FlowError::SerializationError(format!("Failed to serialize configuration: {}", e)))?;

        std::fs::write(path, config_str).map_err(|e| FlowError::FileError {
            path: path.to_path_buf(),
            message: format!("Failed to write configuration: {}", e),
        })?;

        info!("Configuration saved to {}", path.display());

        Ok(())
    }
}
