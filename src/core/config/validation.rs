//! Contains validation logic for the final Config struct.

use super::Config;
use crate::core::error::{AppError, Result};
use std::time::Duration;

/// Validates the configuration settings after loading and potential overrides.
/// Mutates the config to clamp values or set defaults where applicable and logical.
/// Internal helper for the builder's `build` method.
pub(crate) fn validate_config(config: &mut Config) -> Result<()> {
    if config.targets.is_empty() {
        return Err(AppError::Config(
            "Probe target list cannot be empty.".to_string(),
        ));
    }
    if let Some(bad) = config.targets.iter().find(|t| t.host.trim().is_empty()) {
        return Err(AppError::Config(format!(
            "Probe target with priority {} has an empty host.",
            bad.priority
        )));
    }

    for target in &mut config.targets {
        if target.port == 0 {
            tracing::warn!(
                "Target '{}' was given port 0. Resetting to 25.",
                target.host
            );
            target.port = 25;
        }
    }

    if config.probe_timeout.is_zero() {
        tracing::warn!("A probe timeout of 0 ms is not usable. Resetting to 5000 ms.");
        config.probe_timeout = Duration::from_millis(5000);
    }

    if config.banner_prefix.trim().is_empty() {
        tracing::warn!("Banner prefix is empty. Resetting to \"220\".");
        config.banner_prefix = "220".to_string();
    }

    let mut priorities: Vec<u32> = config.targets.iter().map(|t| t.priority).collect();
    priorities.sort_unstable();
    if priorities.windows(2).any(|pair| pair[0] == pair[1]) {
        tracing::warn!("Duplicate target priorities found. Tied targets keep their list order.");
    }

    Ok(())
}
