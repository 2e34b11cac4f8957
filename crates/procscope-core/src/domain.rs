//! Domain definitions for engine categorization.
//!
//! Engines are grouped by the analytical area they serve. Domains are used for
//! catalog listings and for tagging log output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Analytical domain of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    /// Process mining: trace extraction, DFG discovery, model synthesis
    ProcessMining,

    /// Graph analytics: structural complexity and performance estimates
    GraphAnalytics,

    /// Compliance: regulatory heuristics over process models
    Compliance,

    /// Optimization: rule-based improvement recommendations
    Optimization,
}

impl Domain {
    /// All available domains.
    pub const ALL: &'static [Domain] = &[
        Domain::ProcessMining,
        Domain::GraphAnalytics,
        Domain::Compliance,
        Domain::Optimization,
    ];

    /// Returns the domain name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Domain::ProcessMining => "ProcessMining",
            Domain::GraphAnalytics => "GraphAnalytics",
            Domain::Compliance => "Compliance",
            Domain::Optimization => "Optimization",
        }
    }

    /// Short prefix used in engine ids (e.g. `procint/dfg-construction`).
    #[must_use]
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            Domain::ProcessMining => "procint",
            Domain::GraphAnalytics => "graph",
            Domain::Compliance => "compliance",
            Domain::Optimization => "advisor",
        }
    }

    /// Parse a domain from its name or id prefix (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_ascii_lowercase();
        Domain::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().to_ascii_lowercase() == lower || d.id_prefix() == lower)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
