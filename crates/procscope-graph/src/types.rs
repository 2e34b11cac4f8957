//! Process graph types and data structures.
//!
//! A [`ProcessGraph`] is the generic node/edge form of a process model, whether it
//! was mined from an event log or handed over by a diagram parser. Nodes and edges
//! keep their insertion order, and every node's `incoming`/`outgoing` lists always
//! match the edge set.

use procscope_core::error::{ProcessError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// ============================================================================
// Node Types
// ============================================================================

/// BPMN element kind of a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    /// Start event.
    StartEvent,
    /// End event.
    EndEvent,
    /// Intermediate (catch/throw) event.
    IntermediateEvent,
    /// Generic task.
    Task,
    /// Task performed by a person through a UI.
    UserTask,
    /// Automated service call.
    ServiceTask,
    /// Script executed by the engine.
    ScriptTask,
    /// Task performed without system support.
    ManualTask,
    /// Message-sending task.
    SendTask,
    /// Message-receiving task.
    ReceiveTask,
    /// Decision-table evaluation.
    BusinessRuleTask,
    /// Embedded sub-process.
    SubProcess,
    /// XOR gateway.
    ExclusiveGateway,
    /// AND gateway.
    ParallelGateway,
    /// OR gateway.
    InclusiveGateway,
    /// Event-based gateway.
    EventBasedGateway,
    /// Complex gateway.
    ComplexGateway,
    /// Any element kind not modelled above.
    Other(String),
}

impl NodeType {
    /// BPMN element name (e.g. `userTask`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::StartEvent => "startEvent",
            NodeType::EndEvent => "endEvent",
            NodeType::IntermediateEvent => "intermediateEvent",
            NodeType::Task => "task",
            NodeType::UserTask => "userTask",
            NodeType::ServiceTask => "serviceTask",
            NodeType::ScriptTask => "scriptTask",
            NodeType::ManualTask => "manualTask",
            NodeType::SendTask => "sendTask",
            NodeType::ReceiveTask => "receiveTask",
            NodeType::BusinessRuleTask => "businessRuleTask",
            NodeType::SubProcess => "subProcess",
            NodeType::ExclusiveGateway => "exclusiveGateway",
            NodeType::ParallelGateway => "parallelGateway",
            NodeType::InclusiveGateway => "inclusiveGateway",
            NodeType::EventBasedGateway => "eventBasedGateway",
            NodeType::ComplexGateway => "complexGateway",
            NodeType::Other(name) => name,
        }
    }

    /// Is this one of the task kinds?
    #[must_use]
    pub fn is_task(&self) -> bool {
        matches!(
            self,
            NodeType::Task
                | NodeType::UserTask
                | NodeType::ServiceTask
                | NodeType::ScriptTask
                | NodeType::ManualTask
                | NodeType::SendTask
                | NodeType::ReceiveTask
                | NodeType::BusinessRuleTask
        )
    }

    /// Is this one of the gateway kinds?
    #[must_use]
    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            NodeType::ExclusiveGateway
                | NodeType::ParallelGateway
                | NodeType::InclusiveGateway
                | NodeType::EventBasedGateway
                | NodeType::ComplexGateway
        )
    }

    /// Is this a parallel (AND) gateway?
    #[must_use]
    pub fn is_parallel_gateway(&self) -> bool {
        matches!(self, NodeType::ParallelGateway)
    }

    /// Is this a task the engine executes without a person?
    #[must_use]
    pub fn is_automated(&self) -> bool {
        matches!(
            self,
            NodeType::ServiceTask | NodeType::ScriptTask | NodeType::BusinessRuleTask
        )
    }
}

impl From<&str> for NodeType {
    fn from(value: &str) -> Self {
        let name = value.strip_prefix("bpmn:").unwrap_or(value);
        match name.to_ascii_lowercase().as_str() {
            "startevent" => NodeType::StartEvent,
            "endevent" => NodeType::EndEvent,
            "intermediateevent" | "intermediatecatchevent" | "intermediatethrowevent" => {
                NodeType::IntermediateEvent
            }
            "task" => NodeType::Task,
            "usertask" => NodeType::UserTask,
            "servicetask" => NodeType::ServiceTask,
            "scripttask" => NodeType::ScriptTask,
            "manualtask" => NodeType::ManualTask,
            "sendtask" => NodeType::SendTask,
            "receivetask" => NodeType::ReceiveTask,
            "businessruletask" => NodeType::BusinessRuleTask,
            "subprocess" => NodeType::SubProcess,
            "exclusivegateway" => NodeType::ExclusiveGateway,
            "parallelgateway" => NodeType::ParallelGateway,
            "inclusivegateway" => NodeType::InclusiveGateway,
            "eventbasedgateway" => NodeType::EventBasedGateway,
            "complexgateway" => NodeType::ComplexGateway,
            _ => NodeType::Other(name.to_string()),
        }
    }
}

impl From<String> for NodeType {
    fn from(value: String) -> Self {
        NodeType::from(value.as_str())
    }
}

impl From<NodeType> for String {
    fn from(value: NodeType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Nodes and Edges
// ============================================================================

/// A node of a process graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node ID.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Element kind.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// IDs of edges targeting this node.
    #[serde(default)]
    pub incoming: Vec<String>,
    /// IDs of edges leaving this node.
    #[serde(default)]
    pub outgoing: Vec<String>,
    /// Swimlane, if the model has lanes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane: Option<String>,
}

impl Node {
    /// Create a new node without edges.
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            lane: None,
        }
    }

    /// Assign the node to a lane.
    #[must_use]
    pub fn with_lane(mut self, lane: impl Into<String>) -> Self {
        self.lane = Some(lane.into());
        self
    }
}

/// A directed edge (sequence flow) of a process graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Edge ID.
    pub id: String,
    /// Source node ID.
    pub source: String,
    /// Target node ID.
    pub target: String,
    /// Observed frequency (mined graphs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u64>,
    /// Guard condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Edge {
    /// Create a new unweighted, unconditional edge.
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            weight: None,
            condition: None,
        }
    }

    /// Set the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set the guard condition.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

// ============================================================================
// Process Graph
// ============================================================================

/// A process model as an ordered node/edge graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProcessGraph", into = "RawProcessGraph")]
pub struct ProcessGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: HashMap<String, usize>,
    edge_index: HashMap<String, usize>,
}

/// Wire form of a process graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProcessGraph {
    /// Nodes in insertion order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges in insertion order.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl ProcessGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from nodes and edges.
    ///
    /// Any `incoming`/`outgoing` lists on the supplied nodes are discarded and
    /// recomputed from `edges`.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut graph = Self::new();
        for mut node in nodes {
            node.incoming.clear();
            node.outgoing.clear();
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Add a node. Fails if the id is already taken.
    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if self.node_index.contains_key(&node.id) {
            return Err(ProcessError::invalid_graph(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Add an edge and register it on its endpoints.
    ///
    /// Fails if the id is already taken or an endpoint does not exist.
    pub fn add_edge(&mut self, edge: Edge) -> Result<()> {
        if self.edge_index.contains_key(&edge.id) {
            return Err(ProcessError::invalid_graph(format!(
                "duplicate edge id '{}'",
                edge.id
            )));
        }
        let source = *self.node_index.get(&edge.source).ok_or_else(|| {
            ProcessError::invalid_graph(format!(
                "edge '{}' references unknown source '{}'",
                edge.id, edge.source
            ))
        })?;
        let target = *self.node_index.get(&edge.target).ok_or_else(|| {
            ProcessError::invalid_graph(format!(
                "edge '{}' references unknown target '{}'",
                edge.id, edge.target
            ))
        })?;

        self.nodes[source].outgoing.push(edge.id.clone());
        self.nodes[target].incoming.push(edge.id.clone());
        self.edge_index.insert(edge.id.clone(), self.edges.len());
        self.edges.push(edge);
        Ok(())
    }

    /// Recompute every node's `incoming`/`outgoing` lists from the edge set.
    pub fn rebuild_adjacency(&mut self) {
        for node in &mut self.nodes {
            node.incoming.clear();
            node.outgoing.clear();
        }
        for edge in &self.edges {
            if let Some(&i) = self.node_index.get(&edge.source) {
                self.nodes[i].outgoing.push(edge.id.clone());
            }
            if let Some(&i) = self.node_index.get(&edge.target) {
                self.nodes[i].incoming.push(edge.id.clone());
            }
        }
    }

    /// Verify that every edge resolves and adjacency lists match the edge set.
    pub fn check_invariants(&self) -> Result<()> {
        let mut expected: HashMap<&str, (Vec<&str>, Vec<&str>)> = HashMap::new();
        for edge in &self.edges {
            if !self.node_index.contains_key(&edge.source)
                || !self.node_index.contains_key(&edge.target)
            {
                return Err(ProcessError::invalid_graph(format!(
                    "edge '{}' has a dangling endpoint",
                    edge.id
                )));
            }
            expected
                .entry(edge.source.as_str())
                .or_default()
                .1
                .push(edge.id.as_str());
            expected
                .entry(edge.target.as_str())
                .or_default()
                .0
                .push(edge.id.as_str());
        }

        for node in &self.nodes {
            let (incoming, outgoing) = expected.remove(node.id.as_str()).unwrap_or_default();
            let matches = |actual: &[String], wanted: &[&str]| {
                actual.len() == wanted.len() && actual.iter().zip(wanted).all(|(a, w)| a == w)
            };
            if !matches(&node.incoming, &incoming) || !matches(&node.outgoing, &outgoing) {
                return Err(ProcessError::invalid_graph(format!(
                    "adjacency of node '{}' does not match its edges",
                    node.id
                )));
            }
        }
        Ok(())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Look up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    /// Insertion position of a node.
    pub fn node_position(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Find the edge between two nodes, if any.
    pub fn edge_between(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Is the graph empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Start events.
    pub fn start_events(&self) -> Vec<&Node> {
        self.nodes_where(|t| *t == NodeType::StartEvent)
    }

    /// End events.
    pub fn end_events(&self) -> Vec<&Node> {
        self.nodes_where(|t| *t == NodeType::EndEvent)
    }

    /// Gateways of any kind.
    pub fn gateways(&self) -> Vec<&Node> {
        self.nodes_where(NodeType::is_gateway)
    }

    /// Tasks of any kind.
    pub fn tasks(&self) -> Vec<&Node> {
        self.nodes_where(NodeType::is_task)
    }

    /// Distinct lane names, sorted.
    pub fn lanes(&self) -> BTreeSet<&str> {
        self.nodes.iter().filter_map(|n| n.lane.as_deref()).collect()
    }

    fn nodes_where(&self, predicate: impl Fn(&NodeType) -> bool) -> Vec<&Node> {
        self.nodes.iter().filter(|n| predicate(&n.node_type)).collect()
    }
}

impl TryFrom<RawProcessGraph> for ProcessGraph {
    type Error = ProcessError;

    fn try_from(raw: RawProcessGraph) -> Result<Self> {
        ProcessGraph::from_parts(raw.nodes, raw.edges)
    }
}

impl From<ProcessGraph> for RawProcessGraph {
    fn from(graph: ProcessGraph) -> Self {
        RawProcessGraph {
            nodes: graph.nodes,
            edges: graph.edges,
        }
    }
}
