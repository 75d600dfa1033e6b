//! Turns raw probe failures into an actionable diagnosis: is port 25
//! blocked, how bad is it, and what should the operator be told.
//!
//! Deliberately pure. No I/O, no logging, total over every input; the
//! check layer feeds it failed attempts only.

use crate::core::error::ProbeError;
use crate::core::models::{BlockedStatus, ClassifiedError, Severity};

use std::io;

const REASON_REFUSED: &str = "Connection refused — port 25 likely blocked by firewall/ISP";
const REASON_TIMEOUT: &str = "Connection timeout — port 25 may be blocked or server unavailable";
const REASON_UNREACHABLE: &str = "Network unreachable — check network configuration";
const REASON_DNS: &str = "DNS resolution failed — server hostname not found";
const REASON_ADDR_IN_USE: &str = "Address in use — temporary issue, retry recommended";
const REASON_UNKNOWN: &str = "Unknown error";

/// Raw failure categories the classification rules key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawCategory {
    Refused,
    TimedOut,
    NetworkUnreachable,
    HostUnreachable,
    NameNotFound,
    AddrInUse,
    Other,
}

fn category_of(error: &ProbeError) -> RawCategory {
    match error {
        ProbeError::Dns { .. } => RawCategory::NameNotFound,
        ProbeError::Timeout { .. } => RawCategory::TimedOut,
        ProbeError::Socket(io_error) => match io_error.kind() {
            io::ErrorKind::ConnectionRefused => RawCategory::Refused,
            io::ErrorKind::TimedOut => RawCategory::TimedOut,
            io::ErrorKind::NetworkUnreachable => RawCategory::NetworkUnreachable,
            io::ErrorKind::HostUnreachable => RawCategory::HostUnreachable,
            io::ErrorKind::AddrInUse => RawCategory::AddrInUse,
            _ => RawCategory::Other,
        },
        ProbeError::InvalidBanner { .. } | ProbeError::ClosedWithoutBanner => RawCategory::Other,
    }
}

/// The POSIX-style code for recognized categories. The prober's own timer
/// carries no platform code, which is what selects the `TIMEOUT` fallback.
fn platform_code(error: &ProbeError, category: RawCategory) -> Option<&'static str> {
    if matches!(error, ProbeError::Timeout { .. }) {
        return None;
    }
    match category {
        RawCategory::Refused => Some("ECONNREFUSED"),
        RawCategory::TimedOut => Some("ETIMEDOUT"),
        RawCategory::NetworkUnreachable => Some("ENETUNREACH"),
        RawCategory::HostUnreachable => Some("EHOSTUNREACH"),
        RawCategory::NameNotFound => Some("ENOTFOUND"),
        RawCategory::AddrInUse => Some("EADDRINUSE"),
        RawCategory::Other => None,
    }
}

/// Maps one raw probe failure to `{blocked, severity, errorCode, reason}`.
///
/// The rules apply in strict order; the first match wins. The timeout rule
/// also catches any failure whose message contains the literal substring
/// "timeout" (case-sensitive), which in practice picks up wrapped platform
/// errors that lost their kind on the way here.
pub fn classify(error: &ProbeError) -> ClassifiedError {
    let category = category_of(error);
    let message = error.to_string();

    match category {
        RawCategory::Refused => ClassifiedError {
            blocked: BlockedStatus::Blocked,
            severity: Severity::High,
            error_code: "ECONNREFUSED".to_string(),
            reason: REASON_REFUSED.to_string(),
        },
        RawCategory::TimedOut => timeout_classification(platform_code(error, category)),
        _ if message.contains("timeout") => timeout_classification(platform_code(error, category)),
        RawCategory::NetworkUnreachable => ClassifiedError {
            blocked: BlockedStatus::Blocked,
            severity: Severity::High,
            error_code: "ENETUNREACH".to_string(),
            reason: REASON_UNREACHABLE.to_string(),
        },
        RawCategory::HostUnreachable => ClassifiedError {
            blocked: BlockedStatus::Blocked,
            severity: Severity::High,
            error_code: "EHOSTUNREACH".to_string(),
            reason: REASON_UNREACHABLE.to_string(),
        },
        RawCategory::NameNotFound => ClassifiedError {
            blocked: BlockedStatus::NotBlocked,
            severity: Severity::Low,
            error_code: "ENOTFOUND".to_string(),
            reason: REASON_DNS.to_string(),
        },
        RawCategory::AddrInUse => ClassifiedError {
            blocked: BlockedStatus::NotBlocked,
            severity: Severity::Low,
            error_code: "EADDRINUSE".to_string(),
            reason: REASON_ADDR_IN_USE.to_string(),
        },
        RawCategory::Other => ClassifiedError {
            blocked: BlockedStatus::Indeterminate,
            severity: Severity::Medium,
            error_code: "UNKNOWN".to_string(),
            reason: if message.is_empty() {
                REASON_UNKNOWN.to_string()
            } else {
                message
            },
        },
    }
}

fn timeout_classification(code: Option<&'static str>) -> ClassifiedError {
    ClassifiedError {
        blocked: BlockedStatus::Blocked,
        severity: Severity::Medium,
        error_code: code.unwrap_or("TIMEOUT").to_string(),
        reason: REASON_TIMEOUT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn io_failure(kind: io::ErrorKind, message: &str) -> ProbeError {
        ProbeError::Socket(io::Error::new(kind, message.to_string()))
    }

    #[test]
    fn refused_means_blocked_high() {
        let classified = classify(&io_failure(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        assert_eq!(classified.blocked, BlockedStatus::Blocked);
        assert_eq!(classified.severity, Severity::High);
        assert_eq!(classified.error_code, "ECONNREFUSED");
        assert_eq!(
            classified.reason,
            "Connection refused — port 25 likely blocked by firewall/ISP"
        );
    }

    #[test]
    fn timed_out_kind_keeps_its_platform_code() {
        let classified = classify(&io_failure(io::ErrorKind::TimedOut, "operation timed out"));
        assert_eq!(classified.blocked, BlockedStatus::Blocked);
        assert_eq!(classified.severity, Severity::Medium);
        assert_eq!(classified.error_code, "ETIMEDOUT");
        assert_eq!(
            classified.reason,
            "Connection timeout — port 25 may be blocked or server unavailable"
        );
    }

    #[test]
    fn probe_timer_falls_back_to_timeout_code() {
        let classified = classify(&ProbeError::Timeout {
            limit: Duration::from_secs(5),
        });
        assert_eq!(classified.blocked, BlockedStatus::Blocked);
        assert_eq!(classified.severity, Severity::Medium);
        assert_eq!(classified.error_code, "TIMEOUT");
    }

    #[test]
    fn timeout_substring_catches_unrecognized_errors() {
        let classified = classify(&io_failure(
            io::ErrorKind::Other,
            "socket timeout while polling",
        ));
        assert_eq!(classified.blocked, BlockedStatus::Blocked);
        assert_eq!(classified.severity, Severity::Medium);
        assert_eq!(classified.error_code, "TIMEOUT");
    }

    #[test]
    fn timeout_substring_match_is_case_sensitive() {
        let classified = classify(&io_failure(io::ErrorKind::Other, "Connection Timeout"));
        assert_eq!(classified.blocked, BlockedStatus::Indeterminate);
        assert_eq!(classified.error_code, "UNKNOWN");
    }

    #[test]
    fn unreachable_network_or_host_means_blocked_high() {
        let net = classify(&io_failure(
            io::ErrorKind::NetworkUnreachable,
            "network is unreachable",
        ));
        assert_eq!(net.blocked, BlockedStatus::Blocked);
        assert_eq!(net.severity, Severity::High);
        assert_eq!(net.error_code, "ENETUNREACH");
        assert_eq!(net.reason, "Network unreachable — check network configuration");

        let host = classify(&io_failure(io::ErrorKind::HostUnreachable, "no route to host"));
        assert_eq!(host.error_code, "EHOSTUNREACH");
        assert_eq!(host.reason, net.reason);
    }

    #[test]
    fn dns_failure_is_not_blocked_low() {
        let classified = classify(&ProbeError::Dns {
            host: "mx.invalid".to_string(),
            message: "Name or service not known".to_string(),
        });
        assert_eq!(classified.blocked, BlockedStatus::NotBlocked);
        assert_eq!(classified.severity, Severity::Low);
        assert_eq!(classified.error_code, "ENOTFOUND");
        assert_eq!(
            classified.reason,
            "DNS resolution failed — server hostname not found"
        );
    }

    #[test]
    fn addr_in_use_is_not_blocked_low() {
        let classified = classify(&io_failure(io::ErrorKind::AddrInUse, "address already in use"));
        assert_eq!(classified.blocked, BlockedStatus::NotBlocked);
        assert_eq!(classified.severity, Severity::Low);
        assert_eq!(classified.error_code, "EADDRINUSE");
        assert_eq!(
            classified.reason,
            "Address in use — temporary issue, retry recommended"
        );
    }

    #[test]
    fn unrecognized_errors_are_indeterminate_with_raw_message() {
        let classified = classify(&io_failure(io::ErrorKind::BrokenPipe, "broken pipe"));
        assert_eq!(classified.blocked, BlockedStatus::Indeterminate);
        assert_eq!(classified.severity, Severity::Medium);
        assert_eq!(classified.error_code, "UNKNOWN");
        assert_eq!(classified.reason, "broken pipe");
    }

    #[test]
    fn empty_message_defaults_to_unknown_error() {
        let classified = classify(&io_failure(io::ErrorKind::WriteZero, ""));
        assert_eq!(classified.reason, "Unknown error");
    }

    #[test]
    fn invalid_banner_keeps_the_protocol_message() {
        let classified = classify(&ProbeError::InvalidBanner {
            banner: "554 no service here".to_string(),
        });
        assert_eq!(classified.blocked, BlockedStatus::Indeterminate);
        assert_eq!(classified.error_code, "UNKNOWN");
        assert_eq!(
            classified.reason,
            "Invalid SMTP banner received: 554 no service here"
        );
    }

    #[test]
    fn silent_close_is_indeterminate() {
        let classified = classify(&ProbeError::ClosedWithoutBanner);
        assert_eq!(classified.blocked, BlockedStatus::Indeterminate);
        assert_eq!(
            classified.reason,
            "connection closed without receiving SMTP banner"
        );
    }

    #[test]
    fn timeout_wording_outranks_the_dns_rule_but_keeps_its_code() {
        let classified = classify(&ProbeError::Dns {
            host: "mx.invalid".to_string(),
            message: "resolver timeout".to_string(),
        });
        assert_eq!(classified.blocked, BlockedStatus::Blocked);
        assert_eq!(classified.severity, Severity::Medium);
        assert_eq!(classified.error_code, "ENOTFOUND");
        assert_eq!(
            classified.reason,
            "Connection timeout — port 25 may be blocked or server unavailable"
        );
    }

    #[test]
    fn refusal_outranks_timeout_wording() {
        let classified = classify(&io_failure(
            io::ErrorKind::ConnectionRefused,
            "refused after timeout",
        ));
        assert_eq!(classified.error_code, "ECONNREFUSED");
        assert_eq!(classified.severity, Severity::High);
    }
}
