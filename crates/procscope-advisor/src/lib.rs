//! # procscope Advisor
//!
//! Turns graph metrics into a ranked list of improvement recommendations.
//!
//! ## Engines
//! - `RecommendationEngine` - Evaluates the rules of a strategy, scores and ranks them
//!
//! Rules live in a static table ([`rules::RULES`]); a strategy
//! ([`strategy::OptimizationStrategy`]) selects which of them run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod rules;
pub mod strategy;
pub mod types;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::engine::*;
    pub use crate::rules::{Rule, RULES};
    pub use crate::strategy::*;
    pub use crate::types::*;
}
