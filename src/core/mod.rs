//! Core domain: configuration, error types, data models, and the
//! multi-host connectivity check.

pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod models;
