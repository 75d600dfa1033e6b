//! Utility modules supporting the connectivity check.

pub(crate) mod smtp;
