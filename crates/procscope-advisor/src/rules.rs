//! The static rule table.
//!
//! Every rule pairs a predicate over `(graph, metrics)` with fixed impact, effort and
//! confidence, and optionally a return-on-investment estimate. Table order is the
//! registration order used to break score ties.

use crate::types::{Candidate, RecommendationCategory};
use procscope_compliance::checks::sensitive_nodes;
use procscope_graph::metrics::GraphMetrics;
use procscope_graph::types::ProcessGraph;
use std::collections::HashMap;
use std::fmt;

/// Predicate or finding over a graph and its metrics.
pub type RuleFn<T> = fn(&ProcessGraph, &GraphMetrics) -> T;

/// One registered rule.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable rule id.
    pub id: &'static str,
    /// Area the rule improves.
    pub category: RecommendationCategory,
    /// Recommendation title.
    pub title: &'static str,
    /// Suggested steps.
    pub actions: &'static [&'static str],
    /// Static impact.
    pub impact: f64,
    /// Static effort.
    pub effort: f64,
    /// Static confidence.
    pub confidence: f64,
    /// Does the rule fire?
    pub check: RuleFn<bool>,
    /// Finding text for a fired rule.
    pub describe: RuleFn<String>,
    /// Return-on-investment estimate, if the rule has one.
    pub roi: Option<RuleFn<f64>>,
}

impl Rule {
    /// Evaluate the rule; `None` when it does not fire.
    pub fn evaluate(&self, graph: &ProcessGraph, metrics: &GraphMetrics) -> Option<Candidate> {
        if !(self.check)(graph, metrics) {
            return None;
        }

        let mut candidate = Candidate::new(self.id, self.category, self.title)
            .with_description((self.describe)(graph, metrics))
            .with_actions(self.actions.iter().copied())
            .with_impact(self.impact)
            .with_effort(self.effort)
            .with_confidence(self.confidence);
        if let Some(roi) = self.roi {
            candidate = candidate.with_roi(roi(graph, metrics).clamp(0.0, 1.0));
        }
        Some(candidate)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("impact", &self.impact)
            .field("effort", &self.effort)
            .field("confidence", &self.confidence)
            .field("has_roi", &self.roi.is_some())
            .finish()
    }
}

/// Look a rule up by id.
pub fn rule(id: &str) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.id == id)
}

/// All rules in registration order.
pub static RULES: &[Rule] = &[
    Rule {
        id: "parallelize-bottlenecks",
        category: RecommendationCategory::Performance,
        title: "Parallelize work around bottlenecks",
        actions: &[
            "Split the converging paths with a parallel gateway",
            "Add capacity to the merge step",
        ],
        impact: 0.8,
        effort: 0.5,
        confidence: 0.7,
        check: |_, m| !m.performance.bottlenecks.is_empty(),
        describe: |_, m| {
            format!(
                "{} node(s) merge more than two flows: {}",
                m.performance.bottlenecks.len(),
                m.performance.bottlenecks.join(", ")
            )
        },
        roi: Some(|_, m| 0.2 * m.performance.bottlenecks.len() as f64),
    },
    Rule {
        id: "automate-manual-work",
        category: RecommendationCategory::Performance,
        title: "Automate manual tasks",
        actions: &[
            "Identify repetitive tasks without human judgement",
            "Replace them with service or script tasks",
        ],
        impact: 0.7,
        effort: 0.6,
        confidence: 0.6,
        check: |g, _| manual_tasks(g) > 5,
        describe: |g, _| {
            format!(
                "{} of {} tasks are performed manually",
                manual_tasks(g),
                g.tasks().len()
            )
        },
        roi: Some(|g, _| ratio(manual_tasks(g), g.tasks().len())),
    },
    Rule {
        id: "reduce-lane-handoffs",
        category: RecommendationCategory::Performance,
        title: "Reduce handoffs between lanes",
        actions: &[
            "Group consecutive work within one lane",
            "Empower a single role to finish the case",
        ],
        impact: 0.6,
        effort: 0.4,
        confidence: 0.6,
        check: |g, _| cross_lane_edges(g) > 2,
        describe: |g, _| format!("{} flows cross lane boundaries", cross_lane_edges(g)),
        roi: None,
    },
    Rule {
        id: "remove-duplicate-activities",
        category: RecommendationCategory::CostReduction,
        title: "Remove duplicate activities",
        actions: &["Merge tasks that perform the same activity"],
        impact: 0.5,
        effort: 0.2,
        confidence: 0.8,
        check: |g, _| !duplicate_task_names(g).is_empty(),
        describe: |g, _| {
            format!(
                "Activities modelled more than once: {}",
                duplicate_task_names(g).join(", ")
            )
        },
        roi: Some(|g, _| ratio(duplicate_task_names(g).len(), g.tasks().len())),
    },
    Rule {
        id: "consolidate-sequential-tasks",
        category: RecommendationCategory::CostReduction,
        title: "Consolidate sequential tasks",
        actions: &["Combine straight-through task chains into fewer steps"],
        impact: 0.5,
        effort: 0.3,
        confidence: 0.6,
        check: |g, _| sequential_tasks(g) >= 4,
        describe: |g, _| {
            format!(
                "{} tasks have a single predecessor and a single successor",
                sequential_tasks(g)
            )
        },
        roi: Some(|g, _| ratio(sequential_tasks(g), g.tasks().len())),
    },
    Rule {
        id: "add-control-gateway",
        category: RecommendationCategory::Compliance,
        title: "Add an approval or control gateway",
        actions: &[
            "Introduce an approval decision before irreversible steps",
            "Document the control owner",
        ],
        impact: 0.7,
        effort: 0.3,
        confidence: 0.8,
        check: |g, _| g.gateways().is_empty(),
        describe: |_, _| "The process has no decision point acting as a control".to_string(),
        roi: None,
    },
    Rule {
        id: "add-end-event",
        category: RecommendationCategory::Compliance,
        title: "Model explicit end events",
        actions: &["Terminate every path with an end event"],
        impact: 0.6,
        effort: 0.1,
        confidence: 0.9,
        check: |g, _| g.end_events().is_empty(),
        describe: |_, _| "No end event; completion of a case cannot be traced".to_string(),
        roi: None,
    },
    Rule {
        id: "protect-sensitive-data",
        category: RecommendationCategory::Compliance,
        title: "Protect personal data",
        actions: &[
            "Record the legal basis for processing",
            "Restrict access to the flagged tasks",
        ],
        impact: 0.8,
        effort: 0.3,
        confidence: 0.7,
        check: |g, _| !sensitive_nodes(g).is_empty(),
        describe: |g, _| {
            let names: Vec<&str> = sensitive_nodes(g).iter().map(|n| n.name.as_str()).collect();
            format!("Possible personal data handled in: {}", names.join(", "))
        },
        roi: None,
    },
    Rule {
        id: "reduce-complexity",
        category: RecommendationCategory::Simplicity,
        title: "Reduce structural complexity",
        actions: &[
            "Extract sub-processes",
            "Remove redundant paths",
        ],
        impact: 0.7,
        effort: 0.6,
        confidence: 0.7,
        check: |_, m| m.complexity.complexity_score > 60,
        describe: |_, m| format!("Complexity score is {}", m.complexity.complexity_score),
        roi: Some(|_, m| f64::from(m.complexity.complexity_score) / 100.0),
    },
    Rule {
        id: "reduce-decision-points",
        category: RecommendationCategory::Simplicity,
        title: "Reduce decision points",
        actions: &["Replace gateway cascades with a decision table"],
        impact: 0.5,
        effort: 0.4,
        confidence: 0.6,
        check: |_, m| m.complexity.decision_points > 5,
        describe: |_, m| format!("{} gateways", m.complexity.decision_points),
        roi: None,
    },
    Rule {
        id: "split-process",
        category: RecommendationCategory::Simplicity,
        title: "Split the process",
        actions: &["Break the model into independently owned sub-processes"],
        impact: 0.6,
        effort: 0.7,
        confidence: 0.5,
        check: |g, _| g.node_count() > 30,
        describe: |g, _| format!("{} nodes in a single model", g.node_count()),
        roi: None,
    },
];

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Task nodes that are not service, script or business-rule tasks.
pub fn manual_tasks(graph: &ProcessGraph) -> usize {
    graph
        .tasks()
        .iter()
        .filter(|t| !t.node_type.is_automated())
        .count()
}

/// Edges whose endpoints sit in different lanes; unlaned nodes never count.
pub fn cross_lane_edges(graph: &ProcessGraph) -> usize {
    graph
        .edges()
        .iter()
        .filter(|e| {
            let lane = |id: &str| graph.node(id).and_then(|n| n.lane.as_deref());
            matches!((lane(&e.source), lane(&e.target)), (Some(a), Some(b)) if a != b)
        })
        .count()
}

/// Task names that occur more than once, compared case-insensitively.
///
/// Returned lowercased, in order of first occurrence.
pub fn duplicate_task_names(graph: &ProcessGraph) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut order = Vec::new();
    for task in graph.tasks() {
        let key = task.name.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let count = seen.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(key);
        }
    }
    order
}

/// Tasks with exactly one incoming and one outgoing edge.
pub fn sequential_tasks(graph: &ProcessGraph) -> usize {
    graph
        .tasks()
        .iter()
        .filter(|t| t.incoming.len() == 1 && t.outgoing.len() == 1)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procscope_graph::types::{Edge, Node, NodeType};
    use std::collections::HashSet;

    fn chain(types: &[NodeType]) -> ProcessGraph {
        let mut graph = ProcessGraph::new();
        for (i, node_type) in types.iter().enumerate() {
            graph
                .add_node(Node::new(format!("n{}", i), format!("Step {}", i), node_type.clone()))
                .unwrap();
            if i > 0 {
                graph
                    .add_edge(Edge::new(format!("f{}", i), format!("n{}", i - 1), format!("n{}", i)))
                    .unwrap();
            }
        }
        graph
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let ids: HashSet<&str> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), RULES.len());
        assert!(rule("split-process").is_some());
        assert!(rule("nonexistent").is_none());
    }

    #[test]
    fn test_manual_task_count() {
        let graph = chain(&[
            NodeType::UserTask,
            NodeType::ServiceTask,
            NodeType::ManualTask,
            NodeType::Task,
            NodeType::ScriptTask,
            NodeType::ExclusiveGateway,
        ]);
        assert_eq!(manual_tasks(&graph), 3);
    }

    #[test]
    fn test_sequential_tasks() {
        let graph = chain(&vec![NodeType::Task; 6]);
        // First and last have only one edge
        assert_eq!(sequential_tasks(&graph), 4);
    }

    #[test]
    fn test_duplicate_names() {
        let mut graph = ProcessGraph::new();
        graph.add_node(Node::new("a", "Review", NodeType::Task)).unwrap();
        graph.add_node(Node::new("b", "review ", NodeType::UserTask)).unwrap();
        graph.add_node(Node::new("c", "Ship", NodeType::Task)).unwrap();
        graph.add_node(Node::new("d", "REVIEW", NodeType::Task)).unwrap();
        assert_eq!(duplicate_task_names(&graph), vec!["review"]);
    }

    #[test]
    fn test_cross_lane_edges() {
        let mut graph = ProcessGraph::new();
        graph.add_node(Node::new("a", "A", NodeType::Task).with_lane("Sales")).unwrap();
        graph.add_node(Node::new("b", "B", NodeType::Task).with_lane("Finance")).unwrap();
        graph.add_node(Node::new("c", "C", NodeType::Task)).unwrap();
        graph.add_edge(Edge::new("f1", "a", "b")).unwrap();
        graph.add_edge(Edge::new("f2", "b", "c")).unwrap();
        assert_eq!(cross_lane_edges(&graph), 1);
    }

    #[test]
    fn test_evaluate_fills_factors() {
        let graph = chain(&[NodeType::Task, NodeType::Task]);
        let metrics = GraphMetrics::compute_default(&graph);

        let candidate = rule("add-control-gateway")
            .unwrap()
            .evaluate(&graph, &metrics)
            .unwrap();
        assert_eq!(candidate.impact, Some(0.7));
        assert_eq!(candidate.effort, Some(0.3));
        assert_eq!(candidate.roi, None);
        assert!(!candidate.actions.is_empty());

        assert!(rule("split-process").unwrap().evaluate(&graph, &metrics).is_none());
    }

    #[test]
    fn test_roi_is_clamped() {
        let graph = chain(&[NodeType::Task, NodeType::Task]);
        let mut metrics = GraphMetrics::compute_default(&graph);
        metrics.performance.bottlenecks = (0..10).map(|i| format!("x{}", i)).collect();

        let candidate = rule("parallelize-bottlenecks")
            .unwrap()
            .evaluate(&graph, &metrics)
            .unwrap();
        assert_eq!(candidate.roi, Some(1.0));
    }
}
