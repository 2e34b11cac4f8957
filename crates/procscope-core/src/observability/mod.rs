//! Observability Infrastructure
//!
//! procscope engines log through `tracing`; this module owns the subscriber setup
//! a host uses to collect those events.

pub mod logging;

pub use logging::{LogConfig, LogLevel, LogOutput};
