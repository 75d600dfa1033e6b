//! The multi-host connectivity check: probes candidate mail exchangers in
//! priority order and folds every failure into one aggregate report.

use crate::core::config::Config;
use crate::core::models::{BlockedStatus, ConnectivityReport, HostError, ProbeTarget};
use crate::utils::smtp::{classify, probe_host};

use std::time::Instant;

const RECOMMEND_ALL_BLOCKED: &str = "Port 25 is blocked by your network/ISP. Consider using a VPS or cloud server with port 25 access for email verification.";
const RECOMMEND_UNDETERMINED: &str = "Unable to determine port 25 status. Some hosts returned unexpected errors. Check your network configuration.";
const RECOMMEND_DNS_OR_NETWORK: &str = "DNS or network issues detected. Verify your internet connection and DNS settings.";

/// Runs the full check against the configured targets.
///
/// Never fails: a report comes back even when every single probe blew up,
/// with the failures classified and folded into it. The first target that
/// greets properly ends the run; later targets are not contacted.
pub(crate) async fn run_check(config: &Config) -> ConnectivityReport {
    let started = Instant::now();

    let mut order: Vec<&ProbeTarget> = config.targets.iter().collect();
    order.sort_by_key(|target| target.priority);

    tracing::info!(
        target: "connectivity",
        "Checking outbound SMTP connectivity against {} targets ({}ms budget each)...",
        order.len(),
        config.probe_timeout.as_millis()
    );

    let mut attempted_hosts: Vec<String> = Vec::new();
    let mut per_host_errors: Vec<HostError> = Vec::new();

    for target in order {
        attempted_hosts.push(target.host.clone());
        tracing::debug!(
            target: "connectivity",
            "Trying {} ({}) on port {}...",
            target.host,
            target.provider,
            target.port
        );

        match probe_host(config, &target.host, target.port).await {
            Ok(success) => {
                tracing::info!(
                    target: "connectivity",
                    "Port 25 reachable via {} ({}) in {}ms.",
                    target.host,
                    target.provider,
                    success.response_time.as_millis()
                );
                return ConnectivityReport::reachable(
                    target,
                    success.banner,
                    success.response_time,
                    attempted_hosts,
                    started.elapsed(),
                );
            }
            Err(error) => {
                tracing::debug!(
                    target: "connectivity",
                    "Probe of {} ({}) failed: {}",
                    target.host,
                    target.provider,
                    error
                );
                let classified = classify(&error);
                per_host_errors.push(HostError::from_classified(target, classified));
            }
        }
    }

    let recommendation = recommendation_for(&per_host_errors);
    tracing::warn!(
        target: "connectivity",
        "All {} connection attempts failed. {}",
        attempted_hosts.len(),
        recommendation
    );
    ConnectivityReport::unreachable(
        attempted_hosts,
        per_host_errors,
        recommendation.to_string(),
        started.elapsed(),
    )
}

/// Chooses the operator guidance for an exhausted target list. A unanimous
/// blocked verdict gets the strong wording; any undetermined failure
/// downgrades it; all-clear failures point at DNS or the local network.
fn recommendation_for(failures: &[HostError]) -> &'static str {
    if failures
        .iter()
        .all(|failure| failure.blocked == BlockedStatus::Blocked)
    {
        RECOMMEND_ALL_BLOCKED
    } else if failures
        .iter()
        .any(|failure| failure.blocked == BlockedStatus::Indeterminate)
    {
        RECOMMEND_UNDETERMINED
    } else {
        RECOMMEND_DNS_OR_NETWORK
    }
}
