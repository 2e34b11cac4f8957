//! Combined graph metrics.
//!
//! Bundles the complexity and performance metrics that downstream engines
//! (compliance, recommendations) consume together.

use crate::complexity::{ComplexityAnalysis, ComplexityMetrics};
use crate::performance::{PerformanceAnalysis, PerformanceConfig, PerformanceMetrics};
use crate::types::ProcessGraph;
use serde::{Deserialize, Serialize};

/// Structural and performance metrics of one graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    /// Structural complexity.
    pub complexity: ComplexityMetrics,
    /// Performance estimates.
    pub performance: PerformanceMetrics,
}

impl GraphMetrics {
    /// Compute all metrics with the given performance heuristics.
    pub fn compute(graph: &ProcessGraph, config: PerformanceConfig) -> Self {
        let complexity = ComplexityAnalysis::compute(graph);
        let performance = PerformanceAnalysis::with_config(config).compute(graph);

        tracing::debug!(
            nodes = complexity.node_count,
            edges = complexity.edge_count,
            cyclomatic = complexity.cyclomatic_complexity,
            bottlenecks = performance.bottlenecks.len(),
            "Computed graph metrics"
        );

        Self {
            complexity,
            performance,
        }
    }

    /// Compute all metrics with default heuristics.
    pub fn compute_default(graph: &ProcessGraph) -> Self {
        Self::compute(graph, PerformanceConfig::default())
    }
}
