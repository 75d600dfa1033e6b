//! Defines the core runtime `Config` struct, its defaults, and the stock
//! probe target list. Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::core::models::ProbeTarget;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Inbound mail exchangers of large providers, in probe order. These hosts
/// answer on port 25 from anywhere the port is not filtered, which is what
/// makes them usable as reachability oracles.
static DEFAULT_TARGETS: Lazy<Vec<ProbeTarget>> = Lazy::new(|| {
    vec![
        ProbeTarget::new("gmail-smtp-in.l.google.com", 25, 1, "Google"),
        ProbeTarget::new("outlook-com.olc.protection.outlook.com", 25, 2, "Microsoft"),
        ProbeTarget::new("mta5.am0.yahoodns.net", 25, 3, "Yahoo"),
        ProbeTarget::new("mx01.mail.icloud.com", 25, 4, "Apple iCloud"),
        ProbeTarget::new("mail.protonmail.ch", 25, 5, "Proton"),
    ]
});

const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;
const DEFAULT_BANNER_PREFIX: &str = "220";

/// Runtime configuration for the connectivity check.
///
/// Built once (via [`ConfigBuilder`] or [`Config::default`]) and passed by
/// shared reference into the check; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Candidate mail exchangers, probed in ascending `priority` order.
    pub targets: Vec<ProbeTarget>,
    /// Budget for one whole probe attempt (resolve + connect + banner wait).
    pub probe_timeout: Duration,
    /// Greeting prefix that counts as service-ready.
    pub banner_prefix: String,
    /// The configuration file that was actually loaded, if any.
    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        Config {
            targets: DEFAULT_TARGETS.clone(),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            banner_prefix: DEFAULT_BANNER_PREFIX.to_string(),
            loaded_config_path: None,
        }
    }

    /// The stock target list, in priority order.
    pub fn default_targets() -> &'static [ProbeTarget] {
        &DEFAULT_TARGETS
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}
