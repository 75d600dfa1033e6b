//! The single-host prober: connect to a mail server, wait for its greeting,
//! validate it, disconnect.

use crate::core::config::Config;
use crate::core::error::ProbeError;
use crate::utils::smtp::result::{ProbeOutcome, ProbeSuccess};

use std::net::SocketAddr;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::net::{lookup_host, TcpStream};

/// Longest greeting chunk we look at. Real 220 lines fit well within this.
const BANNER_READ_LIMIT: usize = 512;

/// Probes one mail server: resolve `host`, open a TCP connection to the
/// first address on `port`, then wait for the SMTP greeting. The configured
/// timeout covers the whole attempt and is not re-armed after connecting.
///
/// Failures come back raw (unclassified) so the caller can decide what they
/// mean. The socket lives inside the attempt future, so every exit path,
/// including the timeout dropping the future mid-await, closes it exactly
/// once.
pub async fn probe_host(config: &Config, host: &str, port: u16) -> ProbeOutcome {
    tracing::debug!(
        target: "smtp_probe",
        "Probing {}:{} (timeout {}ms)...",
        host,
        port,
        config.probe_timeout.as_millis()
    );

    match tokio::time::timeout(config.probe_timeout, attempt(config, host, port)).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => {
            tracing::debug!(
                target: "smtp_probe",
                "Probe of {}:{} hit the {}ms budget.",
                host,
                port,
                config.probe_timeout.as_millis()
            );
            Err(ProbeError::Timeout {
                limit: config.probe_timeout,
            })
        }
    }
}

/// The resolve -> connect -> await-banner progression, written as one
/// fallible future so outcome resolution happens in exactly one place.
async fn attempt(config: &Config, host: &str, port: u16) -> ProbeOutcome {
    let started = Instant::now();

    let addr = resolve_first(host, port).await?;
    let mut stream = TcpStream::connect(addr).await?;
    let response_time = started.elapsed();
    tracing::debug!(
        target: "smtp_probe",
        "Connected to {} ({}) after {}ms, awaiting banner.",
        host,
        addr,
        response_time.as_millis()
    );

    // The server speaks first (RFC 5321); one read of the first chunk is
    // all the greeting check needs.
    let mut buffer = [0u8; BANNER_READ_LIMIT];
    let read = stream.read(&mut buffer).await?;
    if read == 0 {
        return Err(ProbeError::ClosedWithoutBanner);
    }

    let banner = String::from_utf8_lossy(&buffer[..read]).trim().to_string();
    if banner.starts_with(config.banner_prefix.as_str()) {
        tracing::debug!(target: "smtp_probe", "Got service-ready banner from {}: {}", host, banner);
        Ok(ProbeSuccess {
            response_time,
            banner,
        })
    } else {
        Err(ProbeError::InvalidBanner { banner })
    }
}

/// Resolves `host` and keeps the first address.
async fn resolve_first(host: &str, port: u16) -> Result<SocketAddr, ProbeError> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|e| ProbeError::Dns {
            host: host.to_string(),
            message: e.to_string(),
        })?;
    addrs.next().ok_or_else(|| ProbeError::Dns {
        host: host.to_string(),
        message: "no addresses resolved".to_string(),
    })
}
