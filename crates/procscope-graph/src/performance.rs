//! Performance estimation engine.
//!
//! The estimates here are structural heuristics, not measurements:
//! - A bottleneck is a node with more incoming edges than a threshold (default 2)
//! - Duration is a fixed average per task (default 30 minutes)

use crate::types::ProcessGraph;
use procscope_core::{domain::Domain, engine::EngineMetadata, traits::Engine};
use serde::{Deserialize, Serialize};

/// Parameters of the performance heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Average minutes per task.
    pub minutes_per_task: u64,
    /// Nodes with more incoming edges than this are bottlenecks.
    pub bottleneck_threshold: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            minutes_per_task: 30,
            bottleneck_threshold: 2,
        }
    }
}

/// Performance estimates for a process graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Number of task nodes.
    pub task_count: usize,
    /// Bottleneck node ids, in node insertion order.
    pub bottlenecks: Vec<String>,
    /// Estimated end-to-end duration in minutes.
    pub estimated_duration_minutes: u64,
    /// Sum of all edge weights (mined graphs).
    pub total_flow: u64,
    /// Id of the heaviest edge, if any edge is weighted.
    pub busiest_edge: Option<String>,
}

/// Performance analysis engine.
#[derive(Debug, Clone)]
pub struct PerformanceAnalysis {
    metadata: EngineMetadata,
    config: PerformanceConfig,
}

impl Default for PerformanceAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceAnalysis {
    /// Create a new performance analysis engine with default heuristics.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PerformanceConfig::default())
    }

    /// Create with custom heuristics.
    #[must_use]
    pub fn with_config(config: PerformanceConfig) -> Self {
        Self {
            metadata: EngineMetadata::new("graph/performance-analysis", Domain::GraphAnalytics)
                .with_description("Bottleneck detection and duration estimate")
                .with_cost("O(|V| + |E|)"),
            config,
        }
    }

    /// Active heuristics.
    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    /// Compute performance estimates.
    pub fn compute(&self, graph: &ProcessGraph) -> PerformanceMetrics {
        let task_count = graph.tasks().len();

        let busiest_edge = graph
            .edges()
            .iter()
            .filter_map(|e| e.weight.map(|w| (w, e)))
            // max_by_key keeps the last maximum; reverse so the earliest edge wins ties
            .rev()
            .max_by_key(|(w, _)| *w)
            .map(|(_, e)| e.id.clone());

        PerformanceMetrics {
            task_count,
            bottlenecks: Self::bottlenecks(graph, self.config.bottleneck_threshold),
            estimated_duration_minutes: Self::estimated_duration(
                task_count,
                self.config.minutes_per_task,
            ),
            total_flow: graph
                .edges()
                .iter()
                .filter_map(|e| e.weight)
                .fold(0u64, u64::saturating_add),
            busiest_edge,
        }
    }

    /// Ids of nodes with more than `threshold` incoming edges.
    pub fn bottlenecks(graph: &ProcessGraph, threshold: usize) -> Vec<String> {
        graph
            .nodes()
            .iter()
            .filter(|n| n.incoming.len() > threshold)
            .map(|n| n.id.clone())
            .collect()
    }

    /// `task_count * minutes_per_task`, saturating at `u64::MAX`.
    pub fn estimated_duration(task_count: usize, minutes_per_task: u64) -> u64 {
        (task_count as u64).saturating_mul(minutes_per_task)
    }
}

impl Engine for PerformanceAnalysis {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, Node, NodeType};

    fn merge_model() -> ProcessGraph {
        let mut graph = ProcessGraph::new();
        for id in ["a", "b", "c", "d"] {
            graph.add_node(Node::new(id, id, NodeType::Task)).unwrap();
        }
        graph.add_node(Node::new("m", "Merge", NodeType::ExclusiveGateway)).unwrap();
        graph.add_node(Node::new("z", "Archive", NodeType::Task)).unwrap();
        graph.add_edge(Edge::new("e1", "a", "m").with_weight(4)).unwrap();
        graph.add_edge(Edge::new("e2", "b", "m").with_weight(9)).unwrap();
        graph.add_edge(Edge::new("e3", "c", "m").with_weight(9)).unwrap();
        graph.add_edge(Edge::new("e4", "m", "z")).unwrap();
        graph.add_edge(Edge::new("e5", "d", "z")).unwrap();
        graph
    }

    #[test]
    fn test_performance_metadata() {
        let engine = PerformanceAnalysis::new();
        assert_eq!(engine.metadata().id, "graph/performance-analysis");
        assert_eq!(engine.config().minutes_per_task, 30);
    }

    #[test]
    fn test_bottlenecks_and_duration() {
        let metrics = PerformanceAnalysis::new().compute(&merge_model());

        assert_eq!(metrics.bottlenecks, vec!["m"]);
        assert_eq!(metrics.task_count, 5);
        assert_eq!(metrics.estimated_duration_minutes, 150);
        assert_eq!(metrics.total_flow, 22);
        assert_eq!(metrics.busiest_edge.as_deref(), Some("e2"));
    }

    #[test]
    fn test_custom_threshold() {
        let engine = PerformanceAnalysis::with_config(PerformanceConfig {
            minutes_per_task: 10,
            bottleneck_threshold: 1,
        });
        let metrics = engine.compute(&merge_model());

        // Insertion order: m before z
        assert_eq!(metrics.bottlenecks, vec!["m", "z"]);
        assert_eq!(metrics.estimated_duration_minutes, 50);
    }

    #[test]
    fn test_duration_saturates() {
        assert_eq!(PerformanceAnalysis::estimated_duration(3, u64::MAX), u64::MAX);

        let engine = PerformanceAnalysis::with_config(PerformanceConfig {
            minutes_per_task: u64::MAX / 2,
            bottleneck_threshold: 2,
        });
        let metrics = engine.compute(&merge_model());
        assert_eq!(metrics.estimated_duration_minutes, u64::MAX);
    }

    #[test]
    fn test_empty_graph() {
        let metrics = PerformanceAnalysis::new().compute(&ProcessGraph::new());
        assert!(metrics.bottlenecks.is_empty());
        assert_eq!(metrics.estimated_duration_minutes, 0);
        assert!(metrics.busiest_edge.is_none());
    }
}
