//! Criterion benchmarks for whole ticks and the overlap pass.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ledge_arena::ScratchRegion;
use ledge_bench::reference_simulation;
use ledge_core::{EntityIndex, InputAction, InputSnapshot};
use ledge_sim::{gather_live, InterestTable, OverlapGraph};

fn bench_step_idle(c: &mut Criterion) {
    let mut sim = reference_simulation(100).unwrap();
    let input = InputSnapshot::default();
    c.bench_function("step_idle_303", |b| {
        b.iter(|| {
            let result = sim.step(black_box(&input)).unwrap();
            black_box(result.metrics.live_entities);
        });
    });
}

fn bench_step_busy(c: &mut Criterion) {
    let mut sim = reference_simulation(100).unwrap();
    let inputs = [
        InputSnapshot::default().with_down(InputAction::Right),
        InputSnapshot::default().with_press(InputAction::Attack),
        InputSnapshot::default().with_press(InputAction::Throw),
    ];
    let mut i = 0usize;
    c.bench_function("step_busy_303", |b| {
        b.iter(|| {
            i = (i + 1) % inputs.len();
            let result = sim.step(black_box(&inputs[i])).unwrap();
            black_box(result.metrics.overlap_events);
        });
    });
}

fn bench_overlap_build(c: &mut Criterion) {
    let sim = reference_simulation(500).unwrap();
    let store = &sim.snapshot().entities;
    let table = InterestTable::default();
    let mut graph = OverlapGraph::new(4096);
    c.bench_function("overlap_build_1503", |b| {
        b.iter(|| {
            graph.build(black_box(store), &table);
            black_box(graph.event_count());
        });
    });
}

fn bench_gather_live(c: &mut Criterion) {
    let sim = reference_simulation(500).unwrap();
    let store = &sim.snapshot().entities;
    let mut live: ScratchRegion<EntityIndex> = ScratchRegion::new(2048);
    c.bench_function("gather_live_1503", |b| {
        b.iter(|| {
            gather_live(black_box(store), &mut live);
            black_box(live.used());
        });
    });
}

criterion_group!(
    benches,
    bench_step_idle,
    bench_step_busy,
    bench_overlap_build,
    bench_gather_live
);
criterion_main!(benches);
