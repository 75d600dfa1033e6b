//! Defines the structure mirroring the TOML configuration file format.

use crate::core::models::ProbeTarget;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) probe: ProbeSection,
    /// Replaces the stock target list wholesale when present and non-empty.
    pub(crate) targets: Option<Vec<ProbeTarget>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProbeSection {
    pub(crate) timeout_ms: Option<u64>,
    pub(crate) banner_prefix: Option<String>,
}
