//! Shared helpers for hyperlinks and log output.

pub mod hyperlinks;
pub mod log_sanitizer;
