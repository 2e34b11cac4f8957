//! # procscope Compliance
//!
//! A fixed, ordered battery of heuristic compliance checks over a process graph.
//!
//! ## Engines
//! - `ComplianceScoring` - Runs the battery and aggregates an overall score
//!
//! The checks are structural heuristics. They inform a score and do not replace
//! an audit.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checks;
pub mod scoring;
pub mod types;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::checks::*;
    pub use crate::scoring::*;
    pub use crate::types::*;
}
