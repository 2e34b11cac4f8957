//! Process intelligence types and data structures.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// Event Log Types
// ============================================================================

/// A raw event as delivered by a log reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Case/trace ID.
    #[serde(alias = "case_id", alias = "case")]
    pub case_id: String,
    /// Activity name.
    pub activity: String,
    /// Timestamp as written in the log.
    #[serde(alias = "t", alias = "time")]
    pub timestamp: String,
}

impl Event {
    /// Create a new event.
    pub fn new(
        case_id: impl Into<String>,
        activity: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            activity: activity.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// An event with a parsed timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEvent {
    /// Position of the event in the input log.
    pub position: usize,
    /// Case/trace ID.
    pub case_id: String,
    /// Activity name.
    pub activity: String,
    /// Timestamp.
    pub timestamp: DateTime<Utc>,
}

/// A trace (sequence of events for a case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Case ID.
    pub case_id: String,
    /// Events in order.
    pub events: Vec<ProcessEvent>,
}

impl Trace {
    /// Create a new trace.
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            events: Vec::new(),
        }
    }

    /// Build a trace from an activity sequence.
    ///
    /// Events are one second apart starting at the Unix epoch.
    pub fn from_activities<S: AsRef<str>>(case_id: impl Into<String>, activities: &[S]) -> Self {
        let case_id = case_id.into();
        let events = activities
            .iter()
            .enumerate()
            .map(|(i, activity)| ProcessEvent {
                position: i,
                case_id: case_id.clone(),
                activity: activity.as_ref().to_string(),
                timestamp: Utc
                    .timestamp_opt(i as i64, 0)
                    .single()
                    .unwrap_or_default(),
            })
            .collect();
        Self { case_id, events }
    }

    /// Add an event to the trace.
    pub fn add_event(&mut self, event: ProcessEvent) {
        self.events.push(event);
    }

    /// Get activity sequence.
    pub fn activity_sequence(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.activity.as_str()).collect()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Is the trace empty?
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// An event log: traces keyed by case ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    /// Traces by case ID.
    pub traces: BTreeMap<String, Trace>,
}

impl EventLog {
    /// Create a new event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from already-ordered traces.
    pub fn from_traces(traces: impl IntoIterator<Item = Trace>) -> Self {
        Self {
            traces: traces
                .into_iter()
                .map(|t| (t.case_id.clone(), t))
                .collect(),
        }
    }

    /// Append an event to its case's trace.
    pub fn add_event(&mut self, event: ProcessEvent) {
        let trace = self
            .traces
            .entry(event.case_id.clone())
            .or_insert_with(|| Trace::new(event.case_id.clone()));
        trace.add_event(event);
    }

    /// Get the trace of a case.
    pub fn trace(&self, case_id: &str) -> Option<&Trace> {
        self.traces.get(case_id)
    }

    /// Get all unique activities.
    pub fn activities(&self) -> BTreeSet<&str> {
        self.traces
            .values()
            .flat_map(|t| t.events.iter().map(|e| e.activity.as_str()))
            .collect()
    }

    /// Get trace count.
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    /// Get event count.
    pub fn event_count(&self) -> usize {
        self.traces.values().map(Trace::len).sum()
    }
}

// ============================================================================
// Directly-Follows Graph Types
// ============================================================================

/// A directly-follows graph (DFG).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectlyFollowsGraph {
    /// Activities (nodes), sorted.
    pub activities: Vec<String>,
    /// Directly-follows relations, most frequent first.
    pub edges: Vec<DFGEdge>,
    /// Start activities with frequency.
    pub start_activities: BTreeMap<String, u64>,
    /// End activities with frequency.
    pub end_activities: BTreeMap<String, u64>,
    /// Activity frequencies.
    pub activity_counts: BTreeMap<String, u64>,
}

/// An edge in the DFG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DFGEdge {
    /// Source activity.
    pub source: String,
    /// Target activity.
    pub target: String,
    /// Frequency count.
    pub count: u64,
    /// Average time between activities (ms).
    pub avg_duration_ms: f64,
}

impl DFGEdge {
    /// Relation key in `"A -> B"` form.
    pub fn relation_key(&self) -> String {
        format!("{} -> {}", self.source, self.target)
    }
}

impl DirectlyFollowsGraph {
    /// Create a new DFG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get outgoing edges from an activity.
    pub fn outgoing(&self, activity: &str) -> Vec<&DFGEdge> {
        self.edges.iter().filter(|e| e.source == activity).collect()
    }

    /// Get incoming edges to an activity.
    pub fn incoming(&self, activity: &str) -> Vec<&DFGEdge> {
        self.edges.iter().filter(|e| e.target == activity).collect()
    }

    /// Get edge between two activities.
    pub fn edge(&self, source: &str, target: &str) -> Option<&DFGEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }

    /// Relation counts keyed `"A -> B"`.
    ///
    /// Activity names containing `" -> "` can render two pairs to the same key;
    /// their counts are summed so the mapping still totals `total_relations`.
    /// Use [`edges`](Self::edges) to tell such pairs apart.
    pub fn relations(&self) -> BTreeMap<String, u64> {
        let mut relations = BTreeMap::new();
        for edge in &self.edges {
            *relations.entry(edge.relation_key()).or_insert(0) += edge.count;
        }
        relations
    }

    /// Sum of all relation counts.
    pub fn total_relations(&self) -> u64 {
        self.edges.iter().map(|e| e.count).sum()
    }

    /// Activities that start at least one trace.
    pub fn start_nodes(&self) -> BTreeSet<&str> {
        self.start_activities.keys().map(String::as_str).collect()
    }

    /// Activities that end at least one trace.
    pub fn end_nodes(&self) -> BTreeSet<&str> {
        self.end_activities.keys().map(String::as_str).collect()
    }
}

/// DFG construction result with statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DFGResult {
    /// The constructed DFG.
    pub dfg: DirectlyFollowsGraph,
    /// Number of traces processed.
    pub trace_count: u64,
    /// Number of events processed.
    pub event_count: u64,
    /// Number of unique activity pairs.
    pub unique_pairs: u64,
}
