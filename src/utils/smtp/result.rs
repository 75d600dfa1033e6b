// src/utils/smtp/result.rs
//! Defines the outcome types for single-host probe attempts.

use crate::core::error::ProbeError;
use std::time::Duration;

/// What a successful probe observed.
#[derive(Debug, Clone)]
pub struct ProbeSuccess {
    /// Time from the start of the attempt to TCP establishment.
    pub response_time: Duration,
    /// The trimmed greeting line, starting with the service-ready prefix.
    pub banner: String,
}

/// The outcome of one probe attempt: either a timed success or the raw
/// failure, kept unclassified so callers decide how to interpret it.
pub type ProbeOutcome = std::result::Result<ProbeSuccess, ProbeError>;
