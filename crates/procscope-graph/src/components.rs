//! Connected component labelling.
//!
//! Components are computed over the undirected projection of the edge set: edge
//! direction is irrelevant for connectivity. Isolated nodes form their own
//! component.

use crate::types::ProcessGraph;
use procscope_core::{domain::Domain, engine::EngineMetadata, traits::Engine};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Component assignment for a process graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentsResult {
    /// Number of components.
    pub count: usize,
    /// Component index per node, in node insertion order.
    pub assignments: Vec<usize>,
    /// Number of nodes per component.
    pub sizes: Vec<usize>,
}

impl ComponentsResult {
    /// Is the graph a single connected piece?
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.count <= 1
    }
}

/// Connected components engine.
#[derive(Debug, Clone)]
pub struct ConnectedComponents {
    metadata: EngineMetadata,
}

impl Default for ConnectedComponents {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectedComponents {
    /// Create a new connected components engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: EngineMetadata::new("graph/connected-components", Domain::GraphAnalytics)
                .with_description("Undirected BFS component labelling")
                .with_cost("O(|V| + |E|)"),
        }
    }

    /// Label the connected components of `graph`.
    pub fn compute(graph: &ProcessGraph) -> ComponentsResult {
        let n = graph.node_count();

        // Undirected adjacency by node position
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        for edge in graph.edges() {
            let (Some(s), Some(t)) = (
                graph.node_position(&edge.source),
                graph.node_position(&edge.target),
            ) else {
                continue;
            };
            adjacency[s].push(t);
            adjacency[t].push(s);
        }

        let mut assignments = vec![usize::MAX; n];
        let mut sizes = Vec::new();
        let mut queue = VecDeque::new();

        for start in 0..n {
            if assignments[start] != usize::MAX {
                continue;
            }

            let component = sizes.len();
            let mut size = 0;
            assignments[start] = component;
            queue.push_back(start);

            while let Some(current) = queue.pop_front() {
                size += 1;
                for &next in &adjacency[current] {
                    if assignments[next] == usize::MAX {
                        assignments[next] = component;
                        queue.push_back(next);
                    }
                }
            }

            sizes.push(size);
        }

        ComponentsResult {
            count: sizes.len(),
            assignments,
            sizes,
        }
    }

    /// Number of connected components.
    pub fn count(graph: &ProcessGraph) -> usize {
        Self::compute(graph).count
    }
}

impl Engine for ConnectedComponents {
    fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }
}
