//! # procscope
//!
//! Process mining and process-model analysis.
//!
//! procscope turns a flat event log into a process graph and analyses any process
//! graph, mined or parsed from a diagram:
//!
//! ```text
//! events -> traces -> directly-follows graph -> process graph
//!                                                   |
//!                        metrics + compliance -> recommendations
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use procscope::prelude::*;
//!
//! let events = vec![
//!     Event::new("1", "A", "2024-01-01T00:00:00Z"),
//!     Event::new("1", "B", "2024-01-01T00:01:00Z"),
//!     Event::new("2", "A", "2024-01-01T00:02:00Z"),
//!     Event::new("2", "B", "2024-01-01T00:03:00Z"),
//! ];
//!
//! let config = ProcscopeConfig::default();
//! let (discovery, analysis) = mine_and_analyze(&events, &config).unwrap();
//!
//! assert_eq!(discovery.dfg.dfg.relations().get("A -> B"), Some(&2));
//! assert_eq!(analysis.basic.task_count, 2);
//! ```
//!
//! ## Crates
//!
//! | Crate | Domain | Contents |
//! |-------|--------|----------|
//! | `procscope-core` | - | Errors, config, logging, engine metadata |
//! | `procscope-procint` | ProcessMining | Trace extraction, DFG, graph synthesis |
//! | `procscope-graph` | GraphAnalytics | Process graph model, complexity, performance |
//! | `procscope-compliance` | Compliance | Heuristic compliance battery |
//! | `procscope-advisor` | Optimization | Strategy-driven recommendations |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod pipeline;

// Re-export member crates
pub use procscope_advisor as advisor;
pub use procscope_compliance as compliance;
pub use procscope_core as core;
pub use procscope_graph as graph;
pub use procscope_procint as procint;

pub use analysis::{analyze, AnalysisResult};
pub use pipeline::{discover, mine_and_analyze, Discovery};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use procscope_core::prelude::*;

    pub use procscope_advisor::engine::RecommendationEngine;
    pub use procscope_advisor::strategy::OptimizationStrategy;
    pub use procscope_advisor::types::{Priority, Recommendation};
    pub use procscope_compliance::scoring::ComplianceScoring;
    pub use procscope_compliance::types::{ComplianceCheck, ComplianceReport};
    pub use procscope_graph::metrics::GraphMetrics;
    pub use procscope_graph::types::{Edge, Node, NodeType, ProcessGraph};
    pub use procscope_procint::types::{DirectlyFollowsGraph, Event, EventLog, Trace};

    pub use crate::analysis::{analyze, AnalysisResult, Kpis, Risk, RiskCategory, RiskLevel};
    pub use crate::pipeline::{discover, mine_and_analyze, Discovery};
}

/// Version information.
pub mod version {
    /// Crate version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Engine catalog.
pub mod catalog {
    use procscope_core::domain::Domain;
    use procscope_core::engine::EngineMetadata;
    use procscope_core::traits::Engine;

    /// Domain information.
    #[derive(Debug, Clone)]
    pub struct DomainInfo {
        /// Domain enum value.
        pub domain: Domain,
        /// Human-readable name.
        pub name: &'static str,
        /// Description.
        pub description: &'static str,
        /// Crate implementing the domain.
        pub crate_name: &'static str,
    }

    /// Get all domain information.
    pub fn domains() -> Vec<DomainInfo> {
        vec![
            DomainInfo {
                domain: Domain::ProcessMining,
                name: "Process Mining",
                description: "Trace extraction, directly-follows graphs, process graph synthesis",
                crate_name: "procscope-procint",
            },
            DomainInfo {
                domain: Domain::GraphAnalytics,
                name: "Graph Analytics",
                description: "Connected components, complexity, bottlenecks, duration estimate",
                crate_name: "procscope-graph",
            },
            DomainInfo {
                domain: Domain::Compliance,
                name: "Compliance",
                description: "Process structure, personal data, internal controls, accessibility",
                crate_name: "procscope-compliance",
            },
            DomainInfo {
                domain: Domain::Optimization,
                name: "Optimization",
                description: "Rule-based, strategy-driven improvement recommendations",
                crate_name: "procscope-advisor",
            },
        ]
    }

    /// Metadata of every engine, in pipeline order.
    pub fn engines() -> Vec<EngineMetadata> {
        vec![
            procscope_procint::traces::TraceExtraction::new().metadata().clone(),
            procscope_procint::dfg::DFGConstruction::new().metadata().clone(),
            procscope_procint::synthesis::ProcessGraphSynthesis::new().metadata().clone(),
            procscope_graph::components::ConnectedComponents::new().metadata().clone(),
            procscope_graph::complexity::ComplexityAnalysis::new().metadata().clone(),
            procscope_graph::performance::PerformanceAnalysis::new().metadata().clone(),
            procscope_compliance::scoring::ComplianceScoring::new().metadata().clone(),
            procscope_advisor::engine::RecommendationEngine::new().metadata().clone(),
        ]
    }

    /// Engines of one domain.
    pub fn engines_in(domain: Domain) -> Vec<EngineMetadata> {
        engines().into_iter().filter(|e| e.domain == domain).collect()
    }

    /// Get total engine count.
    pub fn total_engine_count() -> usize {
        engines().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procscope_core::domain::Domain;

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let _domain = Domain::ProcessMining;
        let _strategy = OptimizationStrategy::Auto;
        let _graph = ProcessGraph::new();
    }

    #[test]
    fn test_catalog_covers_every_domain() {
        for &domain in Domain::ALL {
            assert!(
                !catalog::engines_in(domain).is_empty(),
                "domain {} has no engine",
                domain
            );
        }
        assert_eq!(catalog::domains().len(), Domain::ALL.len());
    }

    #[test]
    fn test_engine_ids_follow_domain_prefix() {
        for engine in catalog::engines() {
            let prefix = format!("{}/", engine.domain.id_prefix());
            assert!(engine.id.starts_with(&prefix), "{} lacks {}", engine.id, prefix);
        }
    }
}
