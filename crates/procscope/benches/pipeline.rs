//! Benchmark suite for procscope
//!
//! Run with: `cargo bench --package procscope`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use procscope::prelude::*;
use procscope::procint::dfg::DFGConstruction;
use procscope::procint::synthesis::ProcessGraphSynthesis;
use procscope::procint::traces::TraceExtraction;

/// `cases` traces over `activities` distinct activities, ten events each.
fn create_test_events(cases: usize, activities: usize) -> Vec<Event> {
    let mut events = Vec::with_capacity(cases * 10);
    for case in 0..cases {
        for step in 0..10 {
            let activity = (case * 3 + step * 7) % activities;
            events.push(Event::new(
                format!("case{}", case),
                format!("Activity {}", activity),
                format!("2024-01-01T{:02}:{:02}:00Z", step, case % 60),
            ));
        }
    }
    events
}

// ============================================================================
// Process Mining Benchmarks
// ============================================================================

fn dfg_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("procint/dfg");

    for cases in [100, 1000, 10000].iter() {
        let events = create_test_events(*cases, 20);
        let log = TraceExtraction::compute(&events).expect("valid events");

        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::new("cases", cases), cases, |b, _| {
            b.iter(|| DFGConstruction::compute(black_box(&log)))
        });
    }

    group.finish();
}

fn discovery_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("procint/discovery");
    let config = ProcscopeConfig::default();

    for cases in [100, 1000, 10000].iter() {
        let events = create_test_events(*cases, 20);

        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(BenchmarkId::new("cases", cases), cases, |b, _| {
            b.iter(|| discover(black_box(&events), &config))
        });
    }

    group.finish();
}

// ============================================================================
// Analysis Benchmarks
// ============================================================================

fn analysis_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis/full");
    let config = ProcscopeConfig::default();

    for activities in [10, 50, 200].iter() {
        let events = create_test_events(1000, *activities);
        let log = TraceExtraction::compute(&events).expect("valid events");
        let dfg = DFGConstruction::compute(&log);
        let graph = ProcessGraphSynthesis::compute(&dfg.dfg).expect("distinct ids");

        group.throughput(Throughput::Elements(graph.node_count() as u64));
        group.bench_with_input(
            BenchmarkId::new("activities", activities),
            activities,
            |b, _| b.iter(|| analyze(black_box(&graph), &config)),
        );
    }

    group.finish();
}

criterion_group!(benches, dfg_benchmark, discovery_benchmark, analysis_benchmark);
criterion_main!(benches);
