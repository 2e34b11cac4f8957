//! Compliance types and data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// Check Types
// ============================================================================

/// Outcome of a single compliance check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    /// Check name.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Score (0-100).
    pub score: u32,
    /// Free-text findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ComplianceCheck {
    /// Create a check result without details.
    pub fn new(name: impl Into<String>, passed: bool, score: u32) -> Self {
        Self {
            name: name.into(),
            passed,
            score: score.min(100),
            details: None,
        }
    }

    /// Attach findings.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Signature of one check in the battery.
pub type CheckFn = fn(&procscope_graph::types::ProcessGraph) -> ComplianceCheck;

// ============================================================================
// Report Types
// ============================================================================

/// Aggregated compliance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Checks in battery order.
    pub checks: Vec<ComplianceCheck>,
    /// Floor of the mean check score.
    pub overall_score: u32,
    /// Number of checks that did not pass.
    pub failed_checks: usize,
}

impl ComplianceReport {
    /// Build a report from checks in battery order.
    pub fn from_checks(checks: Vec<ComplianceCheck>) -> Self {
        let scores: Vec<u32> = checks.iter().map(|c| c.score).collect();
        Self {
            overall_score: aggregate(&scores),
            failed_checks: checks.iter().filter(|c| !c.passed).count(),
            checks,
        }
    }

    /// Checks that did not pass, in battery order.
    pub fn failures(&self) -> impl Iterator<Item = &ComplianceCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Find a check by name.
    pub fn check(&self, name: &str) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// True when every check passed.
    pub fn is_compliant(&self) -> bool {
        self.failed_checks == 0
    }
}

/// Floor of the mean of `scores`; 0 when empty.
pub fn aggregate(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
    (total / scores.len() as u64) as u32
}
