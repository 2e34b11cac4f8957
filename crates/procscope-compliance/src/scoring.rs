//! Compliance scoring engine.

use crate::checks::BATTERY;
use crate::types::ComplianceReport;
use procscope_core::{domain::Domain, engine::EngineMetadata, traits::Engine};
use procscope_graph::types::ProcessGraph;

/// Compliance scoring engine.
///
/// Runs every check of the battery in order and aggregates the scores.
#[derive(Debug, Clone)]
pub struct ComplianceScoring {
    metadata: EngineMetadata,
}

impl Default for ComplianceScoring {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceScoring {
    /// Create a new compliance scoring engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: EngineMetadata::new("compliance/process-scoring", Domain::Compliance)
                .with_description("Heuristic compliance battery over a process graph")
                .with_cost("O(|V| + |E|)"),
        }
    }

    /// Run the battery.
    pub fn compute(graph: &ProcessGraph) -> ComplianceReport {
        let checks = BATTERY.iter().map(|(_, check)| check(graph)).collect();
        let report = ComplianceReport::from_checks(checks);

        for failure in report.failures() {
            tracing::debug!(
                check = %failure.name,
                score = failure.score,
                details = failure.details.as_deref().unwrap_or(""),
                "Compliance check failed"
            );
        }

        report
    }
}

impl Engine for ComplianceScoring {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{ACCESSIBILITY, INTERNAL_CONTROLS, PROCESS_STRUCTURE, SENSITIVE_DATA};
    use procscope_graph::types::{Edge, Node, NodeType};

    #[test]
    fn test_compliance_scoring_metadata() {
        let engine = ComplianceScoring::new();
        assert_eq!(engine.metadata().id, "compliance/process-scoring");
        assert_eq!(engine.metadata().domain, Domain::Compliance);
    }

    #[test]
    fn test_report_keeps_battery_order() {
        let report = ComplianceScoring::compute(&ProcessGraph::new());
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![PROCESS_STRUCTURE, SENSITIVE_DATA, INTERNAL_CONTROLS, ACCESSIBILITY]
        );
    }

    #[test]
    fn test_empty_graph_report() {
        // 25 + 100 + 50 + 95
        let report = ComplianceScoring::compute(&ProcessGraph::new());
        assert_eq!(report.overall_score, 67);
        assert_eq!(report.failed_checks, 2);
    }

    #[test]
    fn test_well_formed_process() {
        let mut graph = ProcessGraph::new();
        graph.add_node(Node::new("s", "Start", NodeType::StartEvent)).unwrap();
        graph.add_node(Node::new("t1", "Review request", NodeType::UserTask)).unwrap();
        graph.add_node(Node::new("g", "Approved?", NodeType::ExclusiveGateway)).unwrap();
        graph.add_node(Node::new("t2", "Archive", NodeType::ScriptTask)).unwrap();
        graph.add_node(Node::new("e", "End", NodeType::EndEvent)).unwrap();
        graph.add_edge(Edge::new("f1", "s", "t1")).unwrap();
        graph.add_edge(Edge::new("f2", "t1", "g")).unwrap();
        graph.add_edge(Edge::new("f3", "g", "t2")).unwrap();
        graph.add_edge(Edge::new("f4", "t2", "e")).unwrap();

        let report = ComplianceScoring::compute(&graph);
        // 100 + 100 + 100 + 95
        assert_eq!(report.overall_score, 98);
        assert!(report.is_compliant());
    }
}
