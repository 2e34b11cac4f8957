//! Discovery pipeline: event log to process graph.

use crate::analysis::{analyze, AnalysisResult};
use procscope_advisor::strategy::OptimizationStrategy;
use procscope_core::config::ProcscopeConfig;
use procscope_core::error::Result;
use procscope_graph::types::ProcessGraph;
use procscope_procint::dfg::DFGConstruction;
use procscope_procint::synthesis::ProcessGraphSynthesis;
use procscope_procint::traces::TraceExtraction;
use procscope_procint::types::{DFGResult, Event, EventLog};
use serde::{Deserialize, Serialize};

/// Everything a discovery run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discovery {
    /// Per-case traces.
    pub log: EventLog,
    /// Directly-follows graph with statistics (after frequency filtering).
    pub dfg: DFGResult,
    /// Synthesized process graph.
    pub graph: ProcessGraph,
}

/// Mine a process graph from raw events.
///
/// Relations seen fewer than `discovery.min_edge_frequency` times are dropped
/// before synthesis; the default of 1 keeps everything.
pub fn discover(events: &[Event], config: &ProcscopeConfig) -> Result<Discovery> {
    let log = TraceExtraction::compute(events)?;
    let mut dfg = DFGConstruction::compute(&log);

    let min_count = config.discovery.min_edge_frequency;
    if min_count > 1 {
        let before = dfg.dfg.edges.len();
        dfg.dfg = DFGConstruction::filter_by_frequency(&dfg.dfg, min_count);
        dfg.unique_pairs = dfg.dfg.edges.len() as u64;
        tracing::debug!(
            min_count,
            dropped = before - dfg.dfg.edges.len(),
            "Filtered infrequent relations"
        );
    }

    let graph = ProcessGraphSynthesis::compute(&dfg.dfg)?;

    tracing::info!(
        events = events.len(),
        traces = log.trace_count(),
        activities = dfg.dfg.activities.len(),
        relations = dfg.dfg.edges.len(),
        "Discovered process"
    );

    Ok(Discovery { log, dfg, graph })
}

/// Mine a process graph and analyse it.
///
/// The strategy is resolved before mining so a bad name costs nothing.
pub fn mine_and_analyze(
    events: &[Event],
    config: &ProcscopeConfig,
) -> Result<(Discovery, AnalysisResult)> {
    OptimizationStrategy::parse(&config.analysis.strategy)?;
    let discovery = discover(events, config)?;
    let analysis = analyze(&discovery.graph, config)?;
    Ok((discovery, analysis))
}
