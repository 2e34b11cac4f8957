//! Integration tests for procscope
//!
//! These tests run the public pipeline end to end and check the properties every
//! run must hold.

use procscope::prelude::*;
use procscope::procint::dfg::DFGConstruction;
use procscope::procint::synthesis::ProcessGraphSynthesis;
use procscope::procint::traces::TraceExtraction;
use proptest::prelude::*;

fn scenario_events() -> Vec<Event> {
    vec![
        Event::new("1", "A", "2024-01-01T00:00:00Z"),
        Event::new("1", "B", "2024-01-01T00:01:00Z"),
        Event::new("2", "A", "2024-01-01T00:02:00Z"),
        Event::new("2", "B", "2024-01-01T00:03:00Z"),
    ]
}

// ============================================================================
// End-to-end Mining
// ============================================================================

#[test]
fn test_two_case_scenario() {
    let discovery = discover(&scenario_events(), &ProcscopeConfig::default()).unwrap();

    let traces: Vec<(&str, Vec<&str>)> = discovery
        .log
        .traces
        .iter()
        .map(|(id, t)| (id.as_str(), t.activity_sequence()))
        .collect();
    assert_eq!(traces, vec![("1", vec!["A", "B"]), ("2", vec!["A", "B"])]);

    let dfg = &discovery.dfg.dfg;
    assert_eq!(dfg.relations().into_iter().collect::<Vec<_>>(), vec![("A -> B".to_string(), 2)]);
    assert_eq!(dfg.start_nodes().into_iter().collect::<Vec<_>>(), vec!["A"]);
    assert_eq!(dfg.end_nodes().into_iter().collect::<Vec<_>>(), vec!["B"]);

    let graph = &discovery.graph;
    assert_eq!(graph.tasks().len(), 2);
    assert_eq!(graph.start_events().len(), 1);
    assert_eq!(graph.edge_count(), 2);
    assert!(graph.edge_between("start_A", "task_A").is_some());
    assert_eq!(graph.edge_between("task_A", "task_B").unwrap().weight, Some(2));
}

#[test]
fn test_events_from_json() {
    let json = r#"[
        {"case": "1", "activity": "Receive order", "t": "2024-01-01T09:00:00Z"},
        {"caseId": "1", "activity": "Check credit", "timestamp": "2024-01-01 09:30:00"},
        {"case_id": "1", "activity": "Ship", "time": "2024-01-02"}
    ]"#;
    let events: Vec<Event> = serde_json::from_str(json).unwrap();
    let discovery = discover(&events, &ProcscopeConfig::default()).unwrap();

    assert!(discovery.graph.node("task_Receive_order").is_some());
    assert!(discovery.graph.node("task_Check_credit").is_some());
    assert_eq!(
        discovery.log.trace("1").unwrap().activity_sequence(),
        vec!["Receive order", "Check credit", "Ship"]
    );
}

#[test]
fn test_input_errors_surface_verbatim() {
    let err = discover(&[], &ProcscopeConfig::default()).unwrap_err();
    assert!(matches!(err, ProcessError::EmptyLog));
    assert!(err.is_input_error());

    let bad = vec![Event::new("1", "A", "yesterday")];
    let err = discover(&bad, &ProcscopeConfig::default()).unwrap_err();
    assert!(matches!(err, ProcessError::MalformedEvent { index: 0, .. }));

    let colliding = vec![
        Event::new("1", "Pay bill", "2024-01-01T00:00:00Z"),
        Event::new("1", "Pay-bill", "2024-01-01T00:01:00Z"),
    ];
    let err = discover(&colliding, &ProcscopeConfig::default()).unwrap_err();
    assert!(matches!(err, ProcessError::NodeIdCollision { .. }));
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_linear_chain_complexity() {
    let mut graph = ProcessGraph::new();
    for id in ["a", "b", "c"] {
        graph.add_node(Node::new(id, id.to_uppercase(), NodeType::Task)).unwrap();
    }
    graph.add_edge(Edge::new("f1", "a", "b")).unwrap();
    graph.add_edge(Edge::new("f2", "b", "c")).unwrap();

    let analysis = analyze(&graph, &ProcscopeConfig::default()).unwrap();
    assert_eq!(analysis.complexity.cyclomatic_complexity, 1);
    assert_eq!(analysis.complexity.connected_components, 1);
}

#[test]
fn test_unknown_strategy_produces_nothing() {
    let discovery = discover(&scenario_events(), &ProcscopeConfig::default()).unwrap();
    let config = ProcscopeConfig::default().with_strategy("nonexistent");

    let err = analyze(&discovery.graph, &config).unwrap_err();
    assert!(matches!(err, ProcessError::UnknownStrategy(ref s) if s == "nonexistent"));
}

#[test]
fn test_strategies_select_their_rules() {
    let (discovery, _) = mine_and_analyze(&scenario_events(), &ProcscopeConfig::default()).unwrap();
    let metrics = GraphMetrics::compute_default(&discovery.graph);

    let compliance = RecommendationEngine::compute(
        &discovery.graph,
        &metrics,
        OptimizationStrategy::Compliance,
    );
    let ids: Vec<&str> = compliance.iter().map(|r| r.rule_id.as_str()).collect();
    assert!(ids.contains(&"add-control-gateway"));
    assert!(ids.contains(&"add-end-event"));

    let auto = RecommendationEngine::compute(&discovery.graph, &metrics, OptimizationStrategy::Auto);
    for window in auto.windows(2) {
        assert!(window[0].score >= window[1].score);
    }
}

#[test]
fn test_external_graph_from_json() {
    let json = r#"{
        "nodes": [
            {"id": "s", "name": "Start", "type": "bpmn:StartEvent"},
            {"id": "t1", "name": "Register patient", "type": "userTask", "lane": "Front desk"},
            {"id": "g", "name": "Insured?", "type": "exclusiveGateway", "lane": "Front desk"},
            {"id": "t2", "name": "Bill insurer", "type": "serviceTask", "lane": "Billing"},
            {"id": "t3", "name": "Bill patient", "type": "sendTask", "lane": "Billing"},
            {"id": "e", "name": "End", "type": "endEvent"}
        ],
        "edges": [
            {"id": "f1", "source": "s", "target": "t1"},
            {"id": "f2", "source": "t1", "target": "g"},
            {"id": "f3", "source": "g", "target": "t2", "condition": "yes"},
            {"id": "f4", "source": "g", "target": "t3", "condition": "no"},
            {"id": "f5", "source": "t2", "target": "e"},
            {"id": "f6", "source": "t3", "target": "e"}
        ]
    }"#;
    let graph: ProcessGraph = serde_json::from_str(json).unwrap();
    let analysis = analyze(&graph, &ProcscopeConfig::default()).unwrap();

    assert_eq!(analysis.basic.lanes, vec!["Billing", "Front desk"]);
    assert_eq!(analysis.compliance.checks.len(), 4);
    assert_eq!(analysis.compliance.checks[1].score, 75);
    assert!(analysis.compliance.checks[1].passed);
    assert!(analysis
        .recommendations
        .iter()
        .any(|r| r.rule_id == "protect-sensitive-data"));

    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json["kpis"]["process_efficiency"].is_number());
}

#[test]
fn test_graph_with_dangling_edge_is_rejected() {
    let json = r#"{"nodes": [{"id": "a", "type": "task"}], "edges": [{"id": "f", "source": "a", "target": "zz"}]}"#;
    assert!(serde_json::from_str::<ProcessGraph>(json).is_err());
}

// ============================================================================
// Properties
// ============================================================================

fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((0u8..5, 0u8..6, 0u32..600), 1..80).prop_map(|raw| {
        raw.into_iter()
            .map(|(case, activity, second)| {
                Event::new(
                    format!("case{}", case),
                    format!("Activity {}", activity),
                    format!("2024-03-01T10:{:02}:{:02}Z", second / 60, second % 60),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_relation_count_conservation(events in arb_events()) {
        let log = TraceExtraction::compute(&events).unwrap();
        let dfg = DFGConstruction::compute(&log);

        let expected: u64 = log
            .traces
            .values()
            .map(|t| t.len().saturating_sub(1) as u64)
            .sum();
        prop_assert_eq!(dfg.dfg.relations().values().sum::<u64>(), expected);
    }

    #[test]
    fn prop_synthesized_graph_is_consistent(events in arb_events()) {
        let log = TraceExtraction::compute(&events).unwrap();
        let dfg = DFGConstruction::compute(&log);
        let graph = ProcessGraphSynthesis::compute(&dfg.dfg).unwrap();

        prop_assert!(graph.check_invariants().is_ok());
        for edge in graph.edges() {
            prop_assert!(graph.node(&edge.source).is_some());
            prop_assert!(graph.node(&edge.target).is_some());
        }
        for node in graph.nodes() {
            let incoming: Vec<&str> = graph
                .edges()
                .iter()
                .filter(|e| e.target == node.id)
                .map(|e| e.id.as_str())
                .collect();
            prop_assert_eq!(&node.incoming, &incoming);
        }
    }

    #[test]
    fn prop_analysis_is_deterministic(events in arb_events()) {
        let config = ProcscopeConfig::default();
        let (_, first) = mine_and_analyze(&events, &config).unwrap();
        let (_, second) = mine_and_analyze(&events, &config).unwrap();
        prop_assert_eq!(first, second);
    }
}
