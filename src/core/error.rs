//! Defines the custom error types for the smtp-reach library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// The primary error type for configuration and report handling.
///
/// The connectivity check itself never returns this: per-host failures are
/// captured as [`ProbeError`] values and folded into the report.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A raw failure from a single probe attempt.
///
/// The prober reports these unchanged; interpretation happens later in
/// [`classify`](crate::classify). Socket-level failures keep the original
/// [`io::Error`] so its kind and message survive intact.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The hostname could not be resolved before any socket was opened.
    #[error("DNS lookup failed for {host}: {message}")]
    Dns { host: String, message: String },

    /// A socket-level error during connect or while waiting for the banner.
    #[error(transparent)]
    Socket(#[from] io::Error),

    /// Neither connect, data, nor a socket error happened within the window.
    #[error("connection attempt timed out after {}ms", .limit.as_millis())]
    Timeout { limit: Duration },

    /// The server spoke first, but not with a 220 service-ready greeting.
    #[error("Invalid SMTP banner received: {banner}")]
    InvalidBanner { banner: String },

    /// The peer closed the connection without ever sending data.
    #[error("connection closed without receiving SMTP banner")]
    ClosedWithoutBanner,
}

pub type Result<T> = std::result::Result<T, AppError>;
