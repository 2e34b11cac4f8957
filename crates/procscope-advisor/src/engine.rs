//! Recommendation engine.
//!
//! Evaluates the rules of a strategy against a graph, scores the candidates and
//! ranks them by score.

use crate::strategy::OptimizationStrategy;
use crate::types::{Candidate, Recommendation};
use procscope_core::{
    domain::Domain, engine::EngineMetadata, error::Result, traits::Engine,
};
use procscope_graph::metrics::GraphMetrics;
use procscope_graph::types::ProcessGraph;

/// Recommendation engine.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    metadata: EngineMetadata,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create a new recommendation engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: EngineMetadata::new("advisor/recommendations", Domain::Optimization)
                .with_description("Strategy-driven rule evaluation and ranking")
                .with_cost("O(rules * (|V| + |E|))"),
        }
    }

    /// Candidates of every firing rule of `strategy`, in evaluation order.
    pub fn candidates(
        graph: &ProcessGraph,
        metrics: &GraphMetrics,
        strategy: OptimizationStrategy,
    ) -> Vec<Candidate> {
        strategy
            .rules()
            .into_iter()
            .filter_map(|rule| rule.evaluate(graph, metrics))
            .collect()
    }

    /// Score candidates and sort them by score, highest first.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn rank(candidates: Vec<Candidate>) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = candidates
            .into_iter()
            .map(Candidate::into_recommendation)
            .collect();
        recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
        recommendations
    }

    /// Ranked recommendations for a strategy.
    pub fn compute(
        graph: &ProcessGraph,
        metrics: &GraphMetrics,
        strategy: OptimizationStrategy,
    ) -> Vec<Recommendation> {
        let recommendations = Self::rank(Self::candidates(graph, metrics, strategy));

        tracing::debug!(
            strategy = %strategy,
            count = recommendations.len(),
            top = recommendations.first().map(|r| r.rule_id.as_str()).unwrap_or("none"),
            "Generated recommendations"
        );

        recommendations
    }

    /// Ranked recommendations for a strategy given by name.
    ///
    /// Fails with `UnknownStrategy` before any rule runs.
    pub fn generate(
        graph: &ProcessGraph,
        metrics: &GraphMetrics,
        strategy: &str,
    ) -> Result<Vec<Recommendation>> {
        let strategy = OptimizationStrategy::parse(strategy)?;
        Ok(Self::compute(graph, metrics, strategy))
    }
}

impl Engine for RecommendationEngine {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, RecommendationCategory};
    use procscope_core::error::ProcessError;
    use procscope_graph::types::{Edge, Node, NodeType};
    use proptest::prelude::*;

    /// Start, three user tasks, no gateway, no end event.
    fn linear_process() -> ProcessGraph {
        let mut graph = ProcessGraph::new();
        graph.add_node(Node::new("s", "Start", NodeType::StartEvent)).unwrap();
        graph.add_node(Node::new("a", "Enter customer data", NodeType::UserTask)).unwrap();
        graph.add_node(Node::new("b", "Check", NodeType::UserTask)).unwrap();
        graph.add_node(Node::new("c", "Notify", NodeType::UserTask)).unwrap();
        graph.add_edge(Edge::new("f1", "s", "a")).unwrap();
        graph.add_edge(Edge::new("f2", "a", "b")).unwrap();
        graph.add_edge(Edge::new("f3", "b", "c")).unwrap();
        graph
    }

    #[test]
    fn test_recommendation_engine_metadata() {
        let engine = RecommendationEngine::new();
        assert_eq!(engine.metadata().id, "advisor/recommendations");
        assert_eq!(engine.metadata().domain, Domain::Optimization);
    }

    #[test]
    fn test_two_candidate_ordering() {
        let weak = Candidate::new("weak", RecommendationCategory::Simplicity, "Weak")
            .with_impact(0.2)
            .with_roi(0.1)
            .with_effort(0.9)
            .with_confidence(0.0);
        let strong = Candidate::new("strong", RecommendationCategory::Performance, "Strong")
            .with_impact(0.9)
            .with_roi(0.8)
            .with_effort(0.1)
            .with_confidence(1.0);

        let ranked = RecommendationEngine::rank(vec![weak, strong]);

        assert_eq!(ranked[0].rule_id, "strong");
        assert!(ranked[0].score > ranked[1].score);
        assert_eq!(ranked[0].priority, Priority::Medium);
        assert_eq!(ranked[1].priority, Priority::Low);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let a = Candidate::new("first", RecommendationCategory::Compliance, "A").with_impact(0.5);
        let b = Candidate::new("second", RecommendationCategory::Compliance, "B").with_impact(0.5);
        let ranked = RecommendationEngine::rank(vec![a, b]);
        assert_eq!(ranked[0].rule_id, "first");
        assert_eq!(ranked[1].rule_id, "second");
    }

    #[test]
    fn test_equal_scores_rank_by_registration() {
        // 8 manual and 7 service tasks, 7 names modelled twice, no flows
        let mut graph = ProcessGraph::new();
        for i in 0..15 {
            let node_type = if i < 8 { NodeType::Task } else { NodeType::ServiceTask };
            let name = if i < 14 { format!("Step {}", i % 7) } else { "Archive".to_string() };
            graph.add_node(Node::new(format!("t{}", i), name, node_type)).unwrap();
        }
        let metrics = GraphMetrics::compute_default(&graph);

        let recs = RecommendationEngine::compute(&graph, &metrics, OptimizationStrategy::CostReduction);
        let ids: Vec<&str> = recs.iter().map(|r| r.rule_id.as_str()).collect();

        // automate:  0.28 + 0.3 * 8/15 - 0.12 + 0.06 = 0.38
        // duplicate: 0.20 + 0.3 * 7/15 - 0.04 + 0.08 = 0.38
        assert_eq!(recs[0].score, recs[1].score);
        assert_eq!(ids, vec!["automate-manual-work", "remove-duplicate-activities"]);
    }

    #[test]
    fn test_compliance_strategy() {
        let graph = linear_process();
        let metrics = GraphMetrics::compute_default(&graph);

        let recs = RecommendationEngine::compute(&graph, &metrics, OptimizationStrategy::Compliance);
        let ids: Vec<&str> = recs.iter().map(|r| r.rule_id.as_str()).collect();

        // protect-sensitive:   0.32 - 0.06 + 0.07 = 0.33
        // add-end-event:       0.24 - 0.02 + 0.09 = 0.31
        // add-control-gateway: 0.28 - 0.06 + 0.08 = 0.30
        assert_eq!(
            ids,
            vec!["protect-sensitive-data", "add-end-event", "add-control-gateway"]
        );
        assert!(recs.iter().all(|r| r.category == RecommendationCategory::Compliance));
    }

    #[test]
    fn test_simplicity_strategy_on_small_graph() {
        let graph = linear_process();
        let metrics = GraphMetrics::compute_default(&graph);
        assert!(RecommendationEngine::compute(&graph, &metrics, OptimizationStrategy::Simplicity)
            .is_empty());
    }

    #[test]
    fn test_auto_never_repeats_a_rule() {
        let mut graph = ProcessGraph::new();
        for i in 0..7 {
            graph
                .add_node(Node::new(format!("t{}", i), format!("Step {}", i), NodeType::ManualTask))
                .unwrap();
            if i > 0 {
                graph
                    .add_edge(Edge::new(format!("f{}", i), format!("t{}", i - 1), format!("t{}", i)))
                    .unwrap();
            }
        }
        let metrics = GraphMetrics::compute_default(&graph);

        let recs = RecommendationEngine::compute(&graph, &metrics, OptimizationStrategy::Auto);
        let automate = recs.iter().filter(|r| r.rule_id == "automate-manual-work").count();
        assert_eq!(automate, 1);
        assert!(recs.iter().any(|r| r.rule_id == "consolidate-sequential-tasks"));
    }

    #[test]
    fn test_unknown_strategy_yields_no_list() {
        let graph = linear_process();
        let metrics = GraphMetrics::compute_default(&graph);

        let err = RecommendationEngine::generate(&graph, &metrics, "nonexistent").unwrap_err();
        assert!(matches!(err, ProcessError::UnknownStrategy(ref s) if s == "nonexistent"));
    }

    proptest! {
        #[test]
        fn prop_ranking_is_sorted_and_bounded(
            factors in prop::collection::vec(
                (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0),
                0..20,
            )
        ) {
            let candidates: Vec<Candidate> = factors
                .iter()
                .enumerate()
                .map(|(i, (impact, roi, effort, confidence))| {
                    Candidate::new(format!("r{}", i), RecommendationCategory::Performance, "t")
                        .with_impact(*impact)
                        .with_roi(*roi)
                        .with_effort(*effort)
                        .with_confidence(*confidence)
                })
                .collect();

            let ranked = RecommendationEngine::rank(candidates);

            prop_assert_eq!(ranked.len(), factors.len());
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
            for rec in &ranked {
                prop_assert!((0.0..=1.0).contains(&rec.score));
                prop_assert_eq!(rec.priority, Priority::from_score(rec.score));
            }
        }
    }
}
