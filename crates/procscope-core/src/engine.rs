//! Engine metadata.
//!
//! Every pipeline stage carries an [`EngineMetadata`] describing what it computes,
//! which domain it belongs to and how its cost grows with the input.

use crate::domain::Domain;
use serde::{Deserialize, Serialize};

/// Engine metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Unique engine identifier (e.g., "procint/dfg-construction").
    pub id: String,

    /// Analytical domain.
    pub domain: Domain,

    /// Human-readable description.
    pub description: String,

    /// Asymptotic cost of one invocation (e.g., "O(n log n)").
    pub cost: String,

    /// Version of the engine implementation.
    pub version: u32,
}

impl EngineMetadata {
    /// Create new engine metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, domain: Domain) -> Self {
        Self {
            id: id.into(),
            domain,
            description: String::new(),
            cost: "O(n)".to_string(),
            version: 1,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the asymptotic cost.
    #[must_use]
    pub fn with_cost(mut self, cost: impl Into<String>) -> Self {
        self.cost = cost.into();
        self
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Returns the display name (`Domain.EngineName`).
    ///
    /// The engine name is derived from the last id segment,
    /// e.g. "procint/dfg-construction" -> "ProcessMining.DfgConstruction".
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = self.id.rsplit('/').next().unwrap_or(&self.id);
        format!("{}.{}", self.domain, to_pascal_case(name))
    }
}

/// Convert a kebab-case or snake_case string to PascalCase.
fn to_pascal_case(s: &str) -> String {
    s.split(|c| c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
