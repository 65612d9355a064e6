//! Structured logging for docgate.
//!
//! Handles subscriber setup, redaction of secrets in logged text, and
//! per-document verdict events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::VerdictEvent;
pub use logger::{init_logger, DEFAULT_LOG_LEVEL};
pub use redact::redact_sensitive_data;
