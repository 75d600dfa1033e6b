//! # SMTP Reach Core Library
//!
//! This crate answers one operational question: can this machine make
//! outbound SMTP connections on TCP port 25? It probes a short ordered list
//! of well-known mail exchangers, waits for each server's greeting, and
//! folds whatever happened into a single [`ConnectivityReport`] with a
//! classified explanation for every failure.
//!
//! It is designed to be used either directly as a library or via the
//! `smtp-reach` command-line tool (which uses this library).

mod core;
mod utils;

pub use crate::core::config::{Config, ConfigBuilder, ConfigFile};
pub use crate::core::error::{AppError, ProbeError, Result};
pub use crate::core::models::{
    BlockedStatus, ClassifiedError, ConnectivityReport, HostError, ProbeTarget, Severity,
};
pub use crate::utils::smtp::{classify, probe_host, ProbeOutcome, ProbeSuccess};

/// Runs the connectivity check with the stock targets and limits.
pub async fn check_connectivity() -> ConnectivityReport {
    check_connectivity_with(&Config::default()).await
}

/// Runs the connectivity check with an explicit configuration.
///
/// Never returns an error: anything that goes wrong along the way is
/// classified and folded into the report itself, so callers can always
/// render or serialize what came back.
pub async fn check_connectivity_with(config: &Config) -> ConnectivityReport {
    crate::core::check::run_check(config).await
}
