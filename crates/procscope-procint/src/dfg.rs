//! Directly-Follows Graph construction engine.
//!
//! This module provides DFG construction from event logs:
//! - Activity frequency calculation
//! - Directly-follows relationship extraction
//! - Start/end activity identification

use crate::types::{DFGEdge, DFGResult, DirectlyFollowsGraph, EventLog, Trace};
use procscope_core::{domain::Domain, engine::EngineMetadata, traits::Engine};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// DFG Construction Engine
// ============================================================================

/// Running totals for one directly-follows pair.
#[derive(Default)]
struct PairStats {
    count: u64,
    total_duration_ms: u64,
}

/// DFG construction engine.
///
/// Constructs a directly-follows graph from an event log.
#[derive(Debug, Clone)]
pub struct DFGConstruction {
    metadata: EngineMetadata,
}

impl Default for DFGConstruction {
    fn default() -> Self {
        Self::new()
    }
}

impl DFGConstruction {
    /// Create a new DFG construction engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: EngineMetadata::new("procint/dfg-construction", Domain::ProcessMining)
                .with_description("Directly-follows graph construction")
                .with_cost("O(n)"),
        }
    }

    /// Construct DFG from an event log.
    ///
    /// The result depends only on the multiset of traces: activities are sorted and
    /// edges are ordered by count, then by source and target.
    pub fn compute(log: &EventLog) -> DFGResult {
        let mut dfg = DirectlyFollowsGraph::new();
        let mut pairs: BTreeMap<(String, String), PairStats> = BTreeMap::new();
        let mut event_count = 0u64;

        for trace in log.traces.values() {
            event_count += trace.len() as u64;
            Self::accumulate(trace, &mut dfg, &mut pairs);
        }

        let unique_pairs = pairs.len() as u64;
        Self::finish(&mut dfg, pairs);

        tracing::debug!(
            traces = log.trace_count(),
            events = event_count,
            activities = dfg.activities.len(),
            unique_pairs,
            "Constructed directly-follows graph"
        );

        DFGResult {
            dfg,
            trace_count: log.trace_count() as u64,
            event_count,
            unique_pairs,
        }
    }

    /// Construct DFG from a single trace.
    pub fn compute_trace(trace: &Trace) -> DirectlyFollowsGraph {
        let mut dfg = DirectlyFollowsGraph::new();
        let mut pairs = BTreeMap::new();
        Self::accumulate(trace, &mut dfg, &mut pairs);
        Self::finish(&mut dfg, pairs);
        dfg
    }

    fn accumulate(
        trace: &Trace,
        dfg: &mut DirectlyFollowsGraph,
        pairs: &mut BTreeMap<(String, String), PairStats>,
    ) {
        // Empty traces contribute nothing
        let (Some(first), Some(last)) = (trace.events.first(), trace.events.last()) else {
            return;
        };

        *dfg.start_activities
            .entry(first.activity.clone())
            .or_insert(0) += 1;
        *dfg.end_activities.entry(last.activity.clone()).or_insert(0) += 1;

        for event in &trace.events {
            *dfg.activity_counts
                .entry(event.activity.clone())
                .or_insert(0) += 1;
        }

        for window in trace.events.windows(2) {
            let duration = (window[1].timestamp - window[0].timestamp)
                .num_milliseconds()
                .max(0) as u64;

            let key = (window[0].activity.clone(), window[1].activity.clone());
            let stats = pairs.entry(key).or_default();
            stats.count += 1;
            stats.total_duration_ms = stats.total_duration_ms.saturating_add(duration);
        }
    }

    fn finish(dfg: &mut DirectlyFollowsGraph, pairs: BTreeMap<(String, String), PairStats>) {
        dfg.activities = dfg.activity_counts.keys().cloned().collect();

        dfg.edges = pairs
            .into_iter()
            .map(|((source, target), stats)| DFGEdge {
                source,
                target,
                count: stats.count,
                avg_duration_ms: stats.total_duration_ms as f64 / stats.count as f64,
            })
            .collect();

        // Stable sort keeps (source, target) order among equal counts
        dfg.edges.sort_by(|a, b| b.count.cmp(&a.count));
    }

    /// Filter DFG by minimum edge frequency.
    ///
    /// Activities that appear in no surviving edge are dropped together with their
    /// start/end entries.
    pub fn filter_by_frequency(dfg: &DirectlyFollowsGraph, min_count: u64) -> DirectlyFollowsGraph {
        let mut filtered = DirectlyFollowsGraph::new();
        let mut active_activities = BTreeSet::new();

        filtered.edges = dfg
            .edges
            .iter()
            .filter(|e| e.count >= min_count)
            .map(|e| {
                active_activities.insert(e.source.clone());
                active_activities.insert(e.target.clone());
                e.clone()
            })
            .collect();

        filtered.activities = active_activities.iter().cloned().collect();

        let keep = |map: &BTreeMap<String, u64>| -> BTreeMap<String, u64> {
            map.iter()
                .filter(|(k, _)| active_activities.contains(*k))
                .map(|(k, v)| (k.clone(), *v))
                .collect()
        };

        filtered.activity_counts = keep(&dfg.activity_counts);
        filtered.start_activities = keep(&dfg.start_activities);
        filtered.end_activities = keep(&dfg.end_activities);

        filtered
    }

    /// Calculate graph metrics.
    pub fn calculate_metrics(dfg: &DirectlyFollowsGraph) -> DFGMetrics {
        let node_count = dfg.activities.len();
        let edge_count = dfg.edges.len();

        let max_possible_edges = node_count * node_count;
        let density = if max_possible_edges > 0 {
            edge_count as f64 / max_possible_edges as f64
        } else {
            0.0
        };

        let total_edge_weight = dfg.total_relations();
        let avg_edge_weight = if edge_count > 0 {
            total_edge_weight as f64 / edge_count as f64
        } else {
            0.0
        };

        DFGMetrics {
            node_count,
            edge_count,
            density,
            avg_edge_weight,
            start_activity_count: dfg.start_activities.len(),
            end_activity_count: dfg.end_activities.len(),
        }
    }
}

impl Engine for DFGConstruction {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}

/// DFG metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DFGMetrics {
    /// Number of nodes (activities).
    pub node_count: usize,
    /// Number of edges.
    pub edge_count: usize,
    /// Graph density (self-loops allowed).
    pub density: f64,
    /// Average edge weight.
    pub avg_edge_weight: f64,
    /// Number of start activities.
    pub start_activity_count: usize,
    /// Number of end activities.
    pub end_activity_count: usize,
}
