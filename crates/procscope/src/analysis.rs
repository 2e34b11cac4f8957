//! Full analysis of a process graph.
//!
//! Assembles graph metrics, the compliance report and ranked recommendations into
//! one [`AnalysisResult`], and derives the risk list and KPIs from them.

use procscope_advisor::engine::RecommendationEngine;
use procscope_advisor::strategy::OptimizationStrategy;
use procscope_advisor::types::Recommendation;
use procscope_compliance::scoring::ComplianceScoring;
use procscope_compliance::types::ComplianceReport;
use procscope_core::config::ProcscopeConfig;
use procscope_core::error::Result;
use procscope_graph::complexity::ComplexityMetrics;
use procscope_graph::metrics::GraphMetrics;
use procscope_graph::performance::{PerformanceConfig, PerformanceMetrics};
use procscope_graph::types::ProcessGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complexity scores above this are at least a medium risk.
pub const MEDIUM_COMPLEXITY_RISK: u32 = 40;

// ============================================================================
// Result Types
// ============================================================================

/// Element counts of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicStats {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Number of task nodes.
    pub task_count: usize,
    /// Number of gateways.
    pub gateway_count: usize,
    /// Number of start events.
    pub start_event_count: usize,
    /// Number of end events.
    pub end_event_count: usize,
    /// Distinct lanes, sorted.
    pub lanes: Vec<String>,
}

impl BasicStats {
    /// Count the elements of a graph.
    pub fn compute(graph: &ProcessGraph) -> Self {
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            task_count: graph.tasks().len(),
            gateway_count: graph.gateways().len(),
            start_event_count: graph.start_events().len(),
            end_event_count: graph.end_events().len(),
            lanes: graph.lanes().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Severity of a risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Worth a look.
    Low,
    /// Should be addressed.
    Medium,
    /// Must be addressed.
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// What a risk is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    /// Structural complexity.
    Complexity,
    /// Flow convergence.
    Performance,
    /// A failed compliance check.
    Compliance,
    /// Model structure (end events, connectivity).
    Structure,
}

/// One identified risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    /// What the risk is about.
    pub category: RiskCategory,
    /// Severity.
    pub level: RiskLevel,
    /// Human-readable finding.
    pub description: String,
}

impl Risk {
    fn new(category: RiskCategory, level: RiskLevel, description: impl Into<String>) -> Self {
        Self {
            category,
            level,
            description: description.into(),
        }
    }
}

/// Headline indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// `100 - complexity/2 - 5 * bottlenecks`, clamped to 0-100.
    pub process_efficiency: f64,
    /// Overall compliance score.
    pub quality_score: u32,
    /// Percentage of tasks that are already automated.
    pub automation_potential: f64,
    /// Complexity score.
    pub complexity_index: u32,
    /// Estimated cycle time.
    pub estimated_cycle_time_minutes: u64,
}

impl Kpis {
    /// Derive KPIs from the metrics and compliance report.
    pub fn compute(
        graph: &ProcessGraph,
        metrics: &GraphMetrics,
        compliance: &ComplianceReport,
    ) -> Self {
        let complexity = metrics.complexity.complexity_score;
        let efficiency = 100.0
            - f64::from(complexity) / 2.0
            - 5.0 * metrics.performance.bottlenecks.len() as f64;

        let tasks = graph.tasks();
        let automated = tasks.iter().filter(|t| t.node_type.is_automated()).count();
        let automation_potential = if tasks.is_empty() {
            0.0
        } else {
            automated as f64 / tasks.len() as f64 * 100.0
        };

        Self {
            process_efficiency: efficiency.clamp(0.0, 100.0),
            quality_score: compliance.overall_score,
            automation_potential,
            complexity_index: complexity,
            estimated_cycle_time_minutes: metrics.performance.estimated_duration_minutes,
        }
    }
}

/// Complete analysis of one process graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Element counts.
    pub basic: BasicStats,
    /// Structural complexity.
    pub complexity: ComplexityMetrics,
    /// Performance estimates.
    pub performance: PerformanceMetrics,
    /// Compliance battery.
    pub compliance: ComplianceReport,
    /// Identified risks.
    pub risks: Vec<Risk>,
    /// Strategy the recommendations were generated with.
    pub strategy: OptimizationStrategy,
    /// Ranked recommendations.
    pub recommendations: Vec<Recommendation>,
    /// Headline indicators.
    pub kpis: Kpis,
}

impl AnalysisResult {
    /// Risks at the given level.
    pub fn risks_at(&self, level: RiskLevel) -> impl Iterator<Item = &Risk> {
        self.risks.iter().filter(move |r| r.level == level)
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Derive the risk list.
///
/// Complexity scores above `high_threshold` are high risk, above 40 medium.
pub fn identify_risks(
    graph: &ProcessGraph,
    metrics: &GraphMetrics,
    compliance: &ComplianceReport,
    high_threshold: u32,
) -> Vec<Risk> {
    let mut risks = Vec::new();

    let score = metrics.complexity.complexity_score;
    if score > high_threshold {
        risks.push(Risk::new(
            RiskCategory::Complexity,
            RiskLevel::High,
            format!("Complexity score {} makes the process hard to follow", score),
        ));
    } else if score > MEDIUM_COMPLEXITY_RISK {
        risks.push(Risk::new(
            RiskCategory::Complexity,
            RiskLevel::Medium,
            format!("Complexity score {} is elevated", score),
        ));
    }

    for node_id in &metrics.performance.bottlenecks {
        let incoming = graph.node(node_id).map(|n| n.incoming.len()).unwrap_or(0);
        risks.push(Risk::new(
            RiskCategory::Performance,
            RiskLevel::Medium,
            format!("Bottleneck at '{}' ({} incoming flows)", node_id, incoming),
        ));
    }

    for check in compliance.failures() {
        let description = match &check.details {
            Some(details) => format!("{} failed: {}", check.name, details),
            None => format!("{} failed", check.name),
        };
        risks.push(Risk::new(RiskCategory::Compliance, RiskLevel::High, description));
    }

    if !graph.is_empty() && graph.end_events().is_empty() {
        risks.push(Risk::new(
            RiskCategory::Structure,
            RiskLevel::Medium,
            "No end event; case completion is not modelled",
        ));
    }

    if metrics.complexity.connected_components > 1 {
        risks.push(Risk::new(
            RiskCategory::Structure,
            RiskLevel::Medium,
            format!(
                "Model splits into {} disconnected parts",
                metrics.complexity.connected_components
            ),
        ));
    }

    risks
}

/// Analyse a process graph.
///
/// Fails with `UnknownStrategy` for an unknown `analysis.strategy` and with
/// `InvalidGraph` when adjacency lists disagree with the edges; nothing is computed
/// in either case.
pub fn analyze(graph: &ProcessGraph, config: &ProcscopeConfig) -> Result<AnalysisResult> {
    let strategy = OptimizationStrategy::parse(&config.analysis.strategy)?;
    graph.check_invariants()?;

    let metrics = GraphMetrics::compute(
        graph,
        PerformanceConfig {
            minutes_per_task: config.analysis.minutes_per_task,
            bottleneck_threshold: config.analysis.bottleneck_threshold,
        },
    );
    let compliance = ComplianceScoring::compute(graph);
    let recommendations = RecommendationEngine::compute(graph, &metrics, strategy);
    let risks = identify_risks(
        graph,
        &metrics,
        &compliance,
        config.analysis.complexity_alert_threshold,
    );
    let kpis = Kpis::compute(graph, &metrics, &compliance);

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        complexity = metrics.complexity.complexity_score,
        compliance = compliance.overall_score,
        risks = risks.len(),
        recommendations = recommendations.len(),
        %strategy,
        "Analysed process graph"
    );

    Ok(AnalysisResult {
        basic: BasicStats::compute(graph),
        complexity: metrics.complexity,
        performance: metrics.performance,
        compliance,
        risks,
        strategy,
        recommendations,
        kpis,
    })
}
