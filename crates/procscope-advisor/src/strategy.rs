//! Optimization strategies.
//!
//! A strategy names the subset of [`RULES`](crate::rules::RULES) to evaluate.

use crate::rules::{Rule, RULES};
use procscope_core::error::{ProcessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Named rule subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationStrategy {
    /// Fewer, cheaper steps.
    CostReduction,
    /// Throughput and cycle time.
    Performance,
    /// Controls and data protection.
    Compliance,
    /// Smaller models.
    Simplicity,
    /// Performance, cost reduction and compliance combined.
    #[default]
    Auto,
}

const PERFORMANCE_RULES: &[&str] = &[
    "parallelize-bottlenecks",
    "automate-manual-work",
    "reduce-lane-handoffs",
];

const COST_REDUCTION_RULES: &[&str] = &[
    "remove-duplicate-activities",
    "consolidate-sequential-tasks",
    "automate-manual-work",
];

const COMPLIANCE_RULES: &[&str] = &[
    "add-control-gateway",
    "add-end-event",
    "protect-sensitive-data",
];

const SIMPLICITY_RULES: &[&str] = &["reduce-complexity", "reduce-decision-points", "split-process"];

impl OptimizationStrategy {
    /// All strategies.
    pub const ALL: [OptimizationStrategy; 5] = [
        OptimizationStrategy::CostReduction,
        OptimizationStrategy::Performance,
        OptimizationStrategy::Compliance,
        OptimizationStrategy::Simplicity,
        OptimizationStrategy::Auto,
    ];

    /// Strategies that `Auto` combines, in union order.
    pub const AUTO_MEMBERS: [OptimizationStrategy; 3] = [
        OptimizationStrategy::Performance,
        OptimizationStrategy::CostReduction,
        OptimizationStrategy::Compliance,
    ];

    /// Strategy name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OptimizationStrategy::CostReduction => "cost-reduction",
            OptimizationStrategy::Performance => "performance",
            OptimizationStrategy::Compliance => "compliance",
            OptimizationStrategy::Simplicity => "simplicity",
            OptimizationStrategy::Auto => "auto",
        }
    }

    /// Parse a strategy name.
    pub fn parse(name: &str) -> Result<Self> {
        name.parse()
    }

    /// Rule ids the strategy selects.
    ///
    /// `Auto` is the union of its members with duplicates removed; the first
    /// occurrence keeps its position.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        match self {
            OptimizationStrategy::CostReduction => COST_REDUCTION_RULES.to_vec(),
            OptimizationStrategy::Performance => PERFORMANCE_RULES.to_vec(),
            OptimizationStrategy::Compliance => COMPLIANCE_RULES.to_vec(),
            OptimizationStrategy::Simplicity => SIMPLICITY_RULES.to_vec(),
            OptimizationStrategy::Auto => {
                let mut seen = HashSet::new();
                Self::AUTO_MEMBERS
                    .iter()
                    .flat_map(|s| s.rule_ids())
                    .filter(|id| seen.insert(*id))
                    .collect()
            }
        }
    }

    /// Rules of the strategy in registration order.
    pub fn rules(&self) -> Vec<&'static Rule> {
        let ids = self.rule_ids();
        RULES.iter().filter(|r| ids.contains(&r.id)).collect()
    }
}

impl FromStr for OptimizationStrategy {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| ProcessError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for OptimizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
