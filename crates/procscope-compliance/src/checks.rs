//! The individual compliance checks.
//!
//! Each check is a pure function of the graph and always yields a result.

use crate::types::{CheckFn, ComplianceCheck};
use procscope_graph::types::{Node, ProcessGraph};

/// Name of the process structure check.
pub const PROCESS_STRUCTURE: &str = "ISO 9001 process structure";
/// Name of the sensitive data check.
pub const SENSITIVE_DATA: &str = "GDPR sensitive data";
/// Name of the internal controls check.
pub const INTERNAL_CONTROLS: &str = "SOX internal controls";
/// Name of the accessibility check.
pub const ACCESSIBILITY: &str = "WCAG accessibility";

/// Lowercase keywords that mark a node as handling personal data.
pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "data", "user", "customer", "person", "personal", "client", "email", "address", "phone",
    "birth", "patient", "employee",
];

/// The battery, in reporting order.
pub const BATTERY: &[(&str, CheckFn)] = &[
    (PROCESS_STRUCTURE, process_structure),
    (SENSITIVE_DATA, sensitive_data),
    (INTERNAL_CONTROLS, internal_controls),
    (ACCESSIBILITY, accessibility),
];

/// Does the node name contain a sensitive keyword?
pub fn is_sensitive(node: &Node) -> bool {
    let name = node.name.to_lowercase();
    SENSITIVE_KEYWORDS.iter().any(|k| name.contains(k))
}

/// Nodes whose names contain a sensitive keyword, in insertion order.
pub fn sensitive_nodes(graph: &ProcessGraph) -> Vec<&Node> {
    graph.nodes().iter().filter(|n| is_sensitive(n)).collect()
}

/// Start/end presence, task count and task naming; 25 points each.
pub fn process_structure(graph: &ProcessGraph) -> ComplianceCheck {
    let tasks = graph.tasks();
    let mut score = 0;
    let mut findings = Vec::new();

    if graph.start_events().is_empty() {
        findings.push("no start event");
    } else {
        score += 25;
    }

    if graph.end_events().is_empty() {
        findings.push("no end event");
    } else {
        score += 25;
    }

    if tasks.len() >= 2 {
        score += 25;
    } else {
        findings.push("fewer than two tasks");
    }

    // Vacuously true without tasks
    if tasks.iter().all(|t| !t.name.is_empty() && t.name != t.id) {
        score += 25;
    } else {
        findings.push("unnamed tasks");
    }

    let check = ComplianceCheck::new(PROCESS_STRUCTURE, score >= 80, score);
    if findings.is_empty() {
        check
    } else {
        check.with_details(findings.join("; "))
    }
}

/// Keyword scan for personal data; informs the score only.
pub fn sensitive_data(graph: &ProcessGraph) -> ComplianceCheck {
    let flagged = sensitive_nodes(graph);
    if flagged.is_empty() {
        return ComplianceCheck::new(SENSITIVE_DATA, true, 100);
    }

    let names: Vec<&str> = flagged.iter().map(|n| n.name.as_str()).collect();
    ComplianceCheck::new(SENSITIVE_DATA, true, 75)
        .with_details(format!("possible personal data in: {}", names.join(", ")))
}

/// At least one gateway acting as a control point.
pub fn internal_controls(graph: &ProcessGraph) -> ComplianceCheck {
    if graph.gateways().is_empty() {
        ComplianceCheck::new(INTERNAL_CONTROLS, false, 50)
            .with_details("no decision gateway to act as a control point")
    } else {
        ComplianceCheck::new(INTERNAL_CONTROLS, true, 100)
    }
}

/// Fixed score until an external accessibility audit is wired in.
pub fn accessibility(_graph: &ProcessGraph) -> ComplianceCheck {
    ComplianceCheck::new(ACCESSIBILITY, true, 95)
}
