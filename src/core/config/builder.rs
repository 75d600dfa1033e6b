//! Provides the `ConfigBuilder` for fluent configuration construction.

use super::loading::{apply_file_config, load_config_file};
use super::validation::validate_config;
use super::{Config, ConfigFile};
use crate::core::error::{AppError, Result};
use crate::core::models::ProbeTarget;
use std::path::Path;
use std::time::Duration;

/// Builder pattern for creating `Config` instances fluently.
///
/// This is the primary way users should create a `Config` object.
/// It handles loading from files, applying overrides, and validation.
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
    config_file_path: Option<String>,
    overrides: ConfigFile,
}

impl ConfigBuilder {
    /// Creates a new builder with default configuration values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify an optional configuration file path to load.
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file_path = Some(path.into());
        self
    }

    pub fn probe_timeout(mut self, duration: Duration) -> Self {
        self.overrides.probe.timeout_ms = Some(duration.as_millis() as u64);
        self
    }
    pub fn banner_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.overrides.probe.banner_prefix = Some(prefix.into());
        self
    }
    pub fn targets(mut self, targets: Vec<ProbeTarget>) -> Self {
        self.overrides.targets = Some(targets);
        self
    }

    /// Builds the final `Config` object, applying defaults, file settings, overrides, and validation.
    pub fn build(mut self) -> Result<Config> {
        let mut loaded_path: Option<String> = None;

        if let Some(ref path) = self.config_file_path {
            match load_config_file(path) {
                Ok(file_config) => {
                    apply_file_config(&mut self.config, &file_config);
                    loaded_path = Some(path.clone());
                    tracing::info!("Loaded base configuration from specified file: {}", path);
                }
                Err(e) => {
                    tracing::error!("Failed to load specified config file '{}': {}", path, e);
                    return Err(AppError::Config(format!(
                        "Failed to load specified configuration file '{}': {}",
                        path, e
                    )));
                }
            }
        } else {
            tracing::debug!("No config file specified, checking default locations.");
            for path_str in ["./smtp-reach.toml", "./config.toml"] {
                if Path::new(path_str).exists() {
                    tracing::debug!("Found potential default config file: {}", path_str);
                    match load_config_file(path_str) {
                        Ok(file_config) => {
                            apply_file_config(&mut self.config, &file_config);
                            loaded_path = Some(path_str.to_string());
                            tracing::info!(
                                "Loaded base configuration from default location: {}",
                                path_str
                            );
                            break;
                        }
                        Err(e) => {
                            tracing::warn!(
                                "Failed to load or parse default config '{}': {}",
                                path_str,
                                e
                            );
                        }
                    }
                }
            }
            if loaded_path.is_none() {
                tracing::info!("No configuration file found. Using default values and overrides.");
            }
        }

        apply_file_config(&mut self.config, &self.overrides);
        self.config.loaded_config_path = loaded_path;

        validate_config(&mut self.config)?;

        tracing::debug!("Final configuration built successfully.");
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_beat_defaults() {
        let config = ConfigBuilder::new()
            .probe_timeout(Duration::from_millis(1200))
            .banner_prefix("220-")
            .build()
            .expect("valid config");

        assert_eq!(config.probe_timeout, Duration::from_millis(1200));
        assert_eq!(config.banner_prefix, "220-");
        assert_eq!(config.targets.len(), 5);
    }

    #[test]
    fn builder_accepts_custom_targets() {
        let config = ConfigBuilder::new()
            .targets(vec![ProbeTarget::new("mx.example.net", 2525, 1, "Example")])
            .build()
            .expect("valid config");

        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.targets[0].port, 2525);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let result = ConfigBuilder::new()
            .config_file("/definitely/not/here/smtp-reach.toml")
            .build();
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn empty_override_target_list_keeps_stock_targets() {
        let config = ConfigBuilder::new()
            .targets(Vec::new())
            .build()
            .expect("valid config");
        assert_eq!(config.targets.len(), 5);
    }
}
