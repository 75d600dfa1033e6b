//! SMTP-level utilities: the single-host prober and the failure classifier.

pub(crate) mod classify;
pub(crate) mod probe;
pub(crate) mod result;

pub use classify::classify;
pub use probe::probe_host;
pub use result::{ProbeOutcome, ProbeSuccess};
