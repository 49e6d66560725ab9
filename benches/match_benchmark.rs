//! Benchmarks for the match engine.
//!
//! Covers the ray tracer, a single controller turn and full soak matches.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use laser_arena::game::{Board, Roster, trace};
use laser_arena::soak::{SoakConfig, run_soak};
use laser_arena::{Action, Command, CombatantId, Direction, MatchController};

fn bench_trace(c: &mut Criterion) {
    let board = Board::standard();
    let roster = Roster::standard();
    let origin = roster.get(CombatantId::Up).position;

    c.bench_function("trace_opening_shot", |b| {
        b.iter(|| black_box(trace(&board, &roster, black_box(origin), Direction::Down)));
    });

    let empty = Board::empty();
    c.bench_function("trace_full_width", |b| {
        b.iter(|| black_box(trace(&empty, &roster, black_box(origin), Direction::Right)));
    });
}

fn bench_turn(c: &mut Criterion) {
    let shot = Command::new(CombatantId::Up, Action::Shoot, Direction::Down);

    c.bench_function("controller_shoot_turn", |b| {
        b.iter(|| {
            let mut controller = MatchController::started();
            black_box(controller.submit(black_box(shot)))
        });
    });

    c.bench_function("controller_text_turn", |b| {
        b.iter(|| {
            let mut controller = MatchController::started();
            black_box(controller.submit_text(black_box("up shoot down")))
        });
    });
}

fn bench_soak(c: &mut Criterion) {
    let config = SoakConfig::default();

    c.bench_function("soak_single_match", |b| {
        b.iter(|| black_box(run_soak(black_box(42), &config)));
    });

    c.bench_function("soak_10_matches_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                black_box(run_soak(black_box(seed), &config)).ok();
            }
        });
    });
}

criterion_group!(benches, bench_trace, bench_turn, bench_soak);
criterion_main!(benches);
