//! Data types shared across the probing and reporting layers: probe targets,
//! the classified-error shape, and the aggregate connectivity report.

use chrono::Utc;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

pub(crate) fn default_smtp_port() -> u16 {
    25
}

/// One candidate mail exchanger to probe.
///
/// The stock list lives in [`Config`](crate::Config); targets are immutable
/// once built. `port` exists so tests can point a synthetic target at a
/// loopback listener; every stock target uses 25.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTarget {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Probe order: lower values are attempted first.
    pub priority: u32,
    /// Human-readable provider label surfaced in diagnostics.
    pub provider: String,
}

impl ProbeTarget {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        priority: u32,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            priority,
            provider: provider.into(),
        }
    }
}

/// Whether a failure points at deliberate port-25 blocking.
///
/// `Indeterminate` covers failures that say nothing either way (unexpected
/// banners, unrecognized socket errors). On the wire this keeps the legacy
/// `true | false | "unknown"` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedStatus {
    Blocked,
    NotBlocked,
    Indeterminate,
}

impl BlockedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockedStatus::Blocked => "yes",
            BlockedStatus::NotBlocked => "no",
            BlockedStatus::Indeterminate => "unknown",
        }
    }
}

impl Serialize for BlockedStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BlockedStatus::Blocked => serializer.serialize_bool(true),
            BlockedStatus::NotBlocked => serializer.serialize_bool(false),
            BlockedStatus::Indeterminate => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for BlockedStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BlockedVisitor;

        impl Visitor<'_> for BlockedVisitor {
            type Value = BlockedStatus;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a boolean or the string \"unknown\"")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(if value {
                    BlockedStatus::Blocked
                } else {
                    BlockedStatus::NotBlocked
                })
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == "unknown" {
                    Ok(BlockedStatus::Indeterminate)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }
        }

        deserializer.deserialize_any(BlockedVisitor)
    }
}

/// How urgently a failure deserves operator attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Structured diagnosis derived from one raw probe failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    pub blocked: BlockedStatus,
    pub reason: String,
    pub severity: Severity,
    /// Normalized platform code, e.g. `ECONNREFUSED`, or a fallback label.
    pub error_code: String,
}

/// A classified failure tied back to the target that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostError {
    pub host: String,
    pub provider: String,
    pub error_code: String,
    pub reason: String,
    pub severity: Severity,
    pub blocked: BlockedStatus,
}

impl HostError {
    pub(crate) fn from_classified(target: &ProbeTarget, classified: ClassifiedError) -> Self {
        Self {
            host: target.host.clone(),
            provider: target.provider.clone(),
            error_code: classified.error_code,
            reason: classified.reason,
            severity: classified.severity,
            blocked: classified.blocked,
        }
    }
}

const ALL_ATTEMPTS_FAILED: &str = "All connection attempts failed";

/// Aggregate result of one full connectivity check.
///
/// `success` is the envelope flag: it says the check itself ran to
/// completion, not that port 25 works. `port25_open` carries the actual
/// verdict. `tested_host`/`provider` are set exactly when a probe succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityReport {
    pub success: bool,
    pub port25_open: bool,
    pub can_verify_emails: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tested_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Hosts contacted, in attempt order; always a prefix of the target list.
    pub attempted_hosts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    pub total_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smtp_banner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_summary: Option<String>,
    /// Populated only on an exhausted run: one entry per attempted host, in
    /// attempt order. A successful check reports no failures even when
    /// earlier targets misbehaved.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub per_host_errors: Vec<HostError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    pub timestamp_iso8601: String,
}

impl ConnectivityReport {
    /// Builds the short-circuit success report for the target that answered.
    pub(crate) fn reachable(
        target: &ProbeTarget,
        banner: String,
        response_time: Duration,
        attempted_hosts: Vec<String>,
        total_time: Duration,
    ) -> Self {
        Self {
            success: true,
            port25_open: true,
            can_verify_emails: true,
            tested_host: Some(target.host.clone()),
            provider: Some(target.provider.clone()),
            attempted_hosts,
            response_time_ms: Some(response_time.as_millis() as u64),
            total_time_ms: total_time.as_millis() as u64,
            smtp_banner: Some(banner),
            error_summary: None,
            per_host_errors: Vec::new(),
            recommendation: None,
            timestamp_iso8601: iso_timestamp(),
        }
    }

    /// Builds the report for an exhausted target list.
    pub(crate) fn unreachable(
        attempted_hosts: Vec<String>,
        per_host_errors: Vec<HostError>,
        recommendation: String,
        total_time: Duration,
    ) -> Self {
        Self {
            success: true,
            port25_open: false,
            can_verify_emails: false,
            tested_host: None,
            provider: None,
            attempted_hosts,
            response_time_ms: None,
            total_time_ms: total_time.as_millis() as u64,
            smtp_banner: None,
            error_summary: Some(ALL_ATTEMPTS_FAILED.to_string()),
            per_host_errors,
            recommendation: Some(recommendation),
            timestamp_iso8601: iso_timestamp(),
        }
    }
}

fn iso_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
