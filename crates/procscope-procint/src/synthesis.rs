//! Process graph synthesis engine.
//!
//! Turns a directly-follows graph into a [`ProcessGraph`]: one task node per activity,
//! one start event per distinct start activity, and one weighted edge per relation.

use crate::types::DirectlyFollowsGraph;
use procscope_core::{
    domain::Domain,
    engine::EngineMetadata,
    error::{ProcessError, Result},
    traits::Engine,
};
use procscope_graph::types::{Edge, Node, NodeType, ProcessGraph};
use std::collections::HashMap;

/// Prefix of task node ids.
pub const TASK_PREFIX: &str = "task_";
/// Prefix of synthetic start event ids.
pub const START_PREFIX: &str = "start_";
/// Prefix of edge ids.
pub const FLOW_PREFIX: &str = "flow_";

/// Process graph synthesis engine.
#[derive(Debug, Clone)]
pub struct ProcessGraphSynthesis {
    metadata: EngineMetadata,
}

impl Default for ProcessGraphSynthesis {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessGraphSynthesis {
    /// Create a new graph synthesis engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: EngineMetadata::new("procint/graph-synthesis", Domain::ProcessMining)
                .with_description("Directly-follows graph to process graph conversion")
                .with_cost("O(|A| + |R| log |R|)"),
        }
    }

    /// Replace every non-alphanumeric character with `_`.
    pub fn sanitize(activity: &str) -> String {
        activity
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }

    /// Task node id of an activity.
    pub fn node_id(activity: &str) -> String {
        format!("{}{}", TASK_PREFIX, Self::sanitize(activity))
    }

    /// Start event id of a start activity.
    pub fn start_id(activity: &str) -> String {
        format!("{}{}", START_PREFIX, Self::sanitize(activity))
    }

    /// Map every activity to its node id, failing on the first collision.
    pub fn assign_ids(dfg: &DirectlyFollowsGraph) -> Result<HashMap<String, String>> {
        let mut ids: HashMap<String, String> = HashMap::with_capacity(dfg.activities.len());
        let mut owners: HashMap<String, &str> = HashMap::with_capacity(dfg.activities.len());

        for activity in &dfg.activities {
            let id = Self::node_id(activity);
            if let Some(first) = owners.get(id.as_str()) {
                if *first != activity.as_str() {
                    return Err(ProcessError::NodeIdCollision {
                        id,
                        first: first.to_string(),
                        second: activity.clone(),
                    });
                }
                continue;
            }
            owners.insert(id.clone(), activity.as_str());
            ids.insert(activity.clone(), id);
        }

        Ok(ids)
    }

    /// Synthesize a process graph from a DFG.
    pub fn compute(dfg: &DirectlyFollowsGraph) -> Result<ProcessGraph> {
        let ids = Self::assign_ids(dfg)?;
        let lookup = |activity: &str| -> Result<String> {
            ids.get(activity).cloned().ok_or_else(|| {
                ProcessError::invalid_graph(format!(
                    "relation references unknown activity '{}'",
                    activity
                ))
            })
        };

        let mut nodes = Vec::with_capacity(dfg.activities.len() + dfg.start_activities.len());
        for activity in &dfg.activities {
            nodes.push(Node::new(lookup(activity)?, activity.clone(), NodeType::Task));
        }

        let mut edges = Vec::with_capacity(dfg.start_activities.len() + dfg.edges.len());
        let mut next_flow = 0usize;
        let mut flow_id = || {
            next_flow += 1;
            format!("{}{}", FLOW_PREFIX, next_flow)
        };

        for activity in dfg.start_activities.keys() {
            let start = Self::start_id(activity);
            nodes.push(Node::new(start.clone(), "Start", NodeType::StartEvent));
            edges.push(Edge::new(flow_id(), start, lookup(activity)?));
        }

        let mut relations: Vec<_> = dfg.edges.iter().collect();
        relations.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));
        for relation in relations {
            edges.push(
                Edge::new(
                    flow_id(),
                    lookup(&relation.source)?,
                    lookup(&relation.target)?,
                )
                .with_weight(relation.count),
            );
        }

        let mut graph = ProcessGraph::from_parts(nodes, edges)?;
        graph.rebuild_adjacency();

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            start_events = dfg.start_activities.len(),
            "Synthesized process graph"
        );

        Ok(graph)
    }
}

impl Engine for ProcessGraphSynthesis {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}
