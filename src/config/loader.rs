// src/config/loader.rs
//! Layered configuration loader with environment overrides

use crate::config::{constants::paths, MonitorConfig};
use crate::utils::validation::ValidationError;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration loader merging defaults, files and environment
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    current_config: RwLock<MonitorConfig>,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
    #[error("Configuration parse error: {0}")]
    Parse(String),
    #[error("Configuration serialize error: {0}")]
    Serialize(String),
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl ConfigLoader {
    /// Create loader looking at the default file locations
    pub fn new() -> Self {
        Self::with_paths(Self::discover_config_paths())
    }

    /// Create loader with custom paths, merged in order
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            current_config: RwLock::new(MonitorConfig::default()),
        }
    }

    /// Load, merge and validate configuration
    pub fn load(&mut self) -> Result<MonitorConfig, ConfigError> {
        let config = self.load_and_merge_configs(std::env::vars())?;
        *self.current_config.write() = config.clone();
        Ok(config)
    }

    /// Last successfully loaded configuration
    pub fn current(&self) -> MonitorConfig {
        self.current_config.read().clone()
    }

    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Validate a single file on top of the defaults, ignoring the environment
    pub fn validate_config_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let mut merged = Self::default_value()?;
        Self::merge_toml_values(&mut merged, Self::load_config_file(path)?);
        Self::finish(merged).map(|_| ())
    }

    /// Export current configuration to file
    pub fn export_config<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let config = self.current();
        let toml_content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, toml_content)?;
        Ok(())
    }

    fn discover_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from(paths::DEFAULT_CONFIG_FILE),
            PathBuf::from(paths::CONFIG_DIR_FILE),
        ]
    }

    fn default_value() -> Result<toml::Value, ConfigError> {
        toml::Value::try_from(MonitorConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    fn load_and_merge_configs<I>(&self, env: I) -> Result<MonitorConfig, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut merged_config = Self::default_value()?;

        for config_path in &self.config_paths {
            if config_path.exists() {
                debug!(path = %config_path.display(), "merging configuration file");
                let file_config = Self::load_config_file(config_path)?;
                Self::merge_toml_values(&mut merged_config, file_config);
            }
        }

        Self::apply_environment_overrides(&mut merged_config, env);
        Self::finish(merged_config)
    }

    fn finish(merged: toml::Value) -> Result<MonitorConfig, ConfigError> {
        let config: MonitorConfig = merged.try_into()?;
        config.validate()?;
        Ok(config)
    }

    fn load_config_file<P: AsRef<Path>>(path: P) -> Result<toml::Value, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: toml::Value = toml::from_str(&content)?;

        Ok(config)
    }

    fn merge_toml_values(base: &mut toml::Value, overlay: toml::Value) {
        match (base, overlay) {
            (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
                for (key, value) in overlay_table {
                    if let Some(base_value) = base_table.get_mut(&key) {
                        Self::merge_toml_values(base_value, value);
                    } else {
                        base_table.insert(key, value);
                    }
                }
            }
            (base_value, overlay_value) => {
                *base_value = overlay_value;
            }
        }
    }

    /// `ECG_MONITOR__STREAM__CAPACITY=50` sets `stream.capacity`
    fn apply_environment_overrides<I>(config: &mut toml::Value, env: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in env {
            let Some(path) = key.strip_prefix(paths::ENV_PREFIX) else {
                continue;
            };
            let segments: Vec<String> = path
                .split(paths::ENV_PATH_SEPARATOR)
                .map(str::to_lowercase)
                .collect();
            if segments.iter().any(String::is_empty) {
                warn!(variable = %key, "ignoring malformed configuration override");
                continue;
            }
            debug!(variable = %key, "applying configuration override");
            Self::set_nested_value(config, &segments, Self::parse_env_value(&value));
        }
    }

    fn parse_env_value(value: &str) -> toml::Value {
        if let Ok(int_val) = value.parse::<i64>() {
            toml::Value::Integer(int_val)
        } else if let Ok(float_val) = value.parse::<f64>() {
            toml::Value::Float(float_val)
        } else if let Ok(bool_val) = value.parse::<bool>() {
            toml::Value::Boolean(bool_val)
        } else {
            toml::Value::String(value.to_string())
        }
    }

    fn set_nested_value(config: &mut toml::Value, segments: &[String], value: toml::Value) {
        let Some((last, parents)) = segments.split_last() else {
            return;
        };
        let mut current = config;

        for part in parents {
            let toml::Value::Table(table) = current else {
                return;
            };
            current = table
                .entry(part.clone())
                .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
        }

        if let toml::Value::Table(table) = current {
            table.insert(last.clone(), value);
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
