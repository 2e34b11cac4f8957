//! # procscope Core
//!
//! Shared abstractions for the procscope process-analysis engines.
//!
//! This crate provides:
//! - The error taxonomy shared by every pipeline stage
//! - Domain and engine metadata definitions
//! - The `Engine` trait implemented by every analysis stage
//! - Configuration loading (presets, environment, TOML files)
//! - Logging initialisation on top of `tracing-subscriber`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod observability;
pub mod traits;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{AnalysisConfig, DiscoveryConfig, ProcscopeConfig};
    pub use crate::domain::Domain;
    pub use crate::engine::EngineMetadata;
    pub use crate::error::{ProcessError, Result};
    pub use crate::observability::{LogConfig, LogLevel};
    pub use crate::traits::Engine;
}
