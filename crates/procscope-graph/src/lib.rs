//! # procscope Graph Analytics
//!
//! The generic process-graph model shared by mined and parsed process models,
//! plus the structural and performance metrics computed over it.
//!
//! ## Engines
//! - `ConnectedComponents` - Undirected BFS component labelling
//! - `ComplexityAnalysis` - Cyclomatic complexity, cognitive weight, decision points
//! - `PerformanceAnalysis` - Bottlenecks and duration estimate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod complexity;
pub mod components;
pub mod metrics;
pub mod performance;
pub mod types;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::complexity::*;
    pub use crate::components::*;
    pub use crate::metrics::*;
    pub use crate::performance::*;
    pub use crate::types::*;
}
