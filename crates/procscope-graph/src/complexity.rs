//! Structural complexity engine.
//!
//! This module provides the structural metrics of a process graph:
//! - McCabe cyclomatic complexity `E - N + 2P`
//! - Cognitive weight and decision points
//! - A bounded 0-100 complexity score
//! - Density and degree statistics

use crate::components::ConnectedComponents;
use crate::types::ProcessGraph;
use procscope_core::{domain::Domain, engine::EngineMetadata, traits::Engine};
use serde::{Deserialize, Serialize};

/// Structural complexity metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Number of connected components.
    pub connected_components: usize,
    /// McCabe cyclomatic complexity.
    pub cyclomatic_complexity: i64,
    /// `nodes * 1.5 + gateways * 2`.
    pub cognitive_weight: f64,
    /// Number of gateways.
    pub decision_points: usize,
    /// Parallel gateways plus one.
    pub parallel_paths: usize,
    /// Bounded complexity score (0-100).
    pub complexity_score: u32,
    /// Directed graph density.
    pub density: f64,
    /// Average total degree.
    pub avg_degree: f64,
    /// Maximum in-degree.
    pub max_in_degree: usize,
    /// Maximum out-degree.
    pub max_out_degree: usize,
}

/// Complexity analysis engine.
#[derive(Debug, Clone)]
pub struct ComplexityAnalysis {
    metadata: EngineMetadata,
}

impl Default for ComplexityAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplexityAnalysis {
    /// Create a new complexity analysis engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: EngineMetadata::new("graph/complexity-analysis", Domain::GraphAnalytics)
                .with_description("Cyclomatic complexity, cognitive weight, decision points")
                .with_cost("O(|V| + |E|)"),
        }
    }

    /// Compute all complexity metrics.
    pub fn compute(graph: &ProcessGraph) -> ComplexityMetrics {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        let components = ConnectedComponents::count(graph);
        let cyclomatic = Self::cyclomatic_from_counts(edge_count, node_count, components);
        let decision_points = Self::decision_points(graph);

        ComplexityMetrics {
            node_count,
            edge_count,
            connected_components: components,
            cyclomatic_complexity: cyclomatic,
            cognitive_weight: Self::cognitive_weight(graph),
            decision_points,
            parallel_paths: Self::parallel_paths(graph),
            complexity_score: Self::score(cyclomatic, decision_points),
            density: Self::density(node_count, edge_count),
            avg_degree: Self::avg_degree(node_count, edge_count),
            max_in_degree: graph.nodes().iter().map(|n| n.incoming.len()).max().unwrap_or(0),
            max_out_degree: graph.nodes().iter().map(|n| n.outgoing.len()).max().unwrap_or(0),
        }
    }

    /// Cyclomatic complexity `|E| - |N| + 2 * components`.
    pub fn cyclomatic_complexity(graph: &ProcessGraph) -> i64 {
        Self::cyclomatic_from_counts(
            graph.edge_count(),
            graph.node_count(),
            ConnectedComponents::count(graph),
        )
    }

    fn cyclomatic_from_counts(edges: usize, nodes: usize, components: usize) -> i64 {
        edges as i64 - nodes as i64 + 2 * components as i64
    }

    /// Cognitive weight `|N| * 1.5 + |gateways| * 2`.
    pub fn cognitive_weight(graph: &ProcessGraph) -> f64 {
        graph.node_count() as f64 * 1.5 + graph.gateways().len() as f64 * 2.0
    }

    /// Number of gateways.
    pub fn decision_points(graph: &ProcessGraph) -> usize {
        graph.gateways().len()
    }

    /// Parallel gateways plus one.
    pub fn parallel_paths(graph: &ProcessGraph) -> usize {
        graph
            .gateways()
            .iter()
            .filter(|n| n.node_type.is_parallel_gateway())
            .count()
            + 1
    }

    /// `min(100, cyclomatic * 5 + decision_points * 10)`, floored at zero.
    pub fn score(cyclomatic: i64, decision_points: usize) -> u32 {
        (cyclomatic * 5 + decision_points as i64 * 10).clamp(0, 100) as u32
    }

    fn density(nodes: usize, edges: usize) -> f64 {
        if nodes <= 1 {
            return 0.0;
        }
        edges as f64 / (nodes * (nodes - 1)) as f64
    }

    fn avg_degree(nodes: usize, edges: usize) -> f64 {
        if nodes == 0 {
            return 0.0;
        }
        // Each edge contributes to one in-degree and one out-degree
        2.0 * edges as f64 / nodes as f64
    }
}

impl Engine for ComplexityAnalysis {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, Node, NodeType};

    fn linear_chain() -> ProcessGraph {
        let mut graph = ProcessGraph::new();
        for id in ["a", "b", "c"] {
            graph.add_node(Node::new(id, id, NodeType::Task)).unwrap();
        }
        graph.add_edge(Edge::new("e1", "a", "b")).unwrap();
        graph.add_edge(Edge::new("e2", "b", "c")).unwrap();
        graph
    }

    fn gateway_model() -> ProcessGraph {
        let mut graph = ProcessGraph::new();
        graph.add_node(Node::new("s", "Start", NodeType::StartEvent)).unwrap();
        graph.add_node(Node::new("split", "", NodeType::ParallelGateway)).unwrap();
        graph.add_node(Node::new("a", "Pack", NodeType::Task)).unwrap();
        graph.add_node(Node::new("b", "Bill", NodeType::Task)).unwrap();
        graph.add_node(Node::new("join", "", NodeType::ParallelGateway)).unwrap();
        graph.add_node(Node::new("x", "Paid?", NodeType::ExclusiveGateway)).unwrap();
        graph.add_node(Node::new("e", "End", NodeType::EndEvent)).unwrap();
        for (i, (s, t)) in [
            ("s", "split"),
            ("split", "a"),
            ("split", "b"),
            ("a", "join"),
            ("b", "join"),
            ("join", "x"),
            ("x", "e"),
            ("x", "b"),
        ]
        .iter()
        .enumerate()
        {
            graph.add_edge(Edge::new(format!("f{}", i), *s, *t)).unwrap();
        }
        graph
    }

    #[test]
    fn test_complexity_metadata() {
        let engine = ComplexityAnalysis::new();
        assert_eq!(engine.metadata().id, "graph/complexity-analysis");
    }

    #[test]
    fn test_linear_chain_cyclomatic() {
        // 2 edges - 3 nodes + 2 * 1 component
        let graph = linear_chain();
        assert_eq!(ComplexityAnalysis::cyclomatic_complexity(&graph), 1);
    }

    #[test]
    fn test_disconnected_graph_counts_components() {
        let mut graph = linear_chain();
        graph.add_node(Node::new("lonely", "Lonely", NodeType::Task)).unwrap();
        // 2 - 4 + 2 * 2
        assert_eq!(ComplexityAnalysis::cyclomatic_complexity(&graph), 2);
    }

    #[test]
    fn test_gateway_metrics() {
        let graph = gateway_model();
        let metrics = ComplexityAnalysis::compute(&graph);

        assert_eq!(metrics.node_count, 7);
        assert_eq!(metrics.edge_count, 8);
        assert_eq!(metrics.cyclomatic_complexity, 3);
        assert_eq!(metrics.decision_points, 3);
        assert_eq!(metrics.parallel_paths, 3);
        assert!((metrics.cognitive_weight - (7.0 * 1.5 + 6.0)).abs() < 1e-9);
        // 3 * 5 + 3 * 10
        assert_eq!(metrics.complexity_score, 45);
        assert_eq!(metrics.max_in_degree, 2);
        assert_eq!(metrics.max_out_degree, 2);
    }

    #[test]
    fn test_score_is_capped() {
        assert_eq!(ComplexityAnalysis::score(30, 2), 100);
        assert_eq!(ComplexityAnalysis::score(0, 0), 0);
        assert_eq!(ComplexityAnalysis::score(-3, 0), 0);
    }

    #[test]
    fn test_empty_graph_is_neutral() {
        let metrics = ComplexityAnalysis::compute(&ProcessGraph::new());
        assert_eq!(metrics.cyclomatic_complexity, 0);
        assert_eq!(metrics.complexity_score, 0);
        assert_eq!(metrics.parallel_paths, 1);
        assert_eq!(metrics.density, 0.0);
        assert_eq!(metrics.avg_degree, 0.0);
    }
}
