//! # procscope Process Intelligence
//!
//! Process discovery from event logs.
//!
//! ## Engines
//! - `TraceExtraction` - Groups a flat event log into per-case ordered traces
//! - `DFGConstruction` - Directly-follows graph construction
//! - `ProcessGraphSynthesis` - DFG to process graph conversion

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dfg;
pub mod synthesis;
pub mod traces;
pub mod types;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::dfg::*;
    pub use crate::synthesis::*;
    pub use crate::traces::*;
    pub use crate::types::*;
}
