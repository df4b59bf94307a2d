//! Benchmarks for move generation and search performance.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use negabit::board::{perft, GameState};
use negabit::search::Search;
use negabit::types::Color;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let startpos = GameState::new();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| perft(&startpos, Color::White, black_box(depth)))
        });
    }

    let kiwipete = GameState::from_fen(KIWIPETE).unwrap();
    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| perft(&kiwipete, Color::White, black_box(depth)))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = GameState::new();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(startpos.legal_moves(Color::White)))
    });

    let kiwipete = GameState::from_fen(KIWIPETE).unwrap();
    group.bench_function("kiwipete", |b| {
        b.iter(|| black_box(kiwipete.legal_moves(Color::White)))
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let startpos = GameState::new();
    group.bench_function("startpos_100ms", |b| {
        b.iter(|| {
            let mut search = Search::new();
            search.choose_move(&startpos, Color::White, Duration::from_millis(100))
        })
    });

    let kiwipete = GameState::from_fen(KIWIPETE).unwrap();
    group.bench_function("kiwipete_100ms", |b| {
        b.iter(|| {
            let mut search = Search::new();
            search.choose_move(&kiwipete, Color::White, Duration::from_millis(100))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search);
criterion_main!(benches);
