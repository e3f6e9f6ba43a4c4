//! Benchmarks for the settlement engine.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- greedy
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use rust_decimal::Decimal;
use tripsettle::{
    compute_balances, compute_settlements, EngineConfig, Expense, RoundedBalances, RoundingPolicy,
    SettlementEngine, SettlementStrategy, Trip,
};

// ============================================================================
// HELPER FUNCTIONS - Deterministic trip generation
// ============================================================================

/// Generate a deterministic trip for benchmarking
fn generate_trip(members: usize, expenses: usize, seed: u64) -> Trip {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut trip = Trip::new("bench");

    for i in 0..members {
        trip = trip.member(i as u64 + 1, format!("member-{}", i + 1));
    }
    for i in 0..expenses {
        let cents: i64 = rng.gen_range(1..=100_000);
        let payer: u64 = rng.gen_range(1..=members as u64);
        let split: Vec<u64> = (0..rng.gen_range(1..=members.min(8)))
            .map(|_| rng.gen_range(1..=members as u64))
            .collect();
        trip = trip.expense(Expense::new(format!("e{}", i), Decimal::new(cents, 2), payer, split));
    }

    trip
}

// ============================================================================
// BENCHMARKS
// ============================================================================

/// Balance folding alone, by expense count
fn bench_balances(c: &mut Criterion) {
    let mut group = c.benchmark_group("balances");
    group.measurement_time(Duration::from_secs(5));

    for expenses in [100usize, 1_000, 10_000] {
        let trip = generate_trip(20, expenses, 1);
        group.throughput(Throughput::Elements(expenses as u64));
        group.bench_with_input(BenchmarkId::new("expenses", expenses), &trip, |b, trip| {
            b.iter(|| compute_balances(black_box(&trip.members), black_box(&trip.expenses)))
        });
    }

    group.finish();
}

/// Greedy matcher alone, by member count
fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    group.measurement_time(Duration::from_secs(5));

    for members in [10usize, 100, 1_000] {
        let trip = generate_trip(members, members * 10, 2);
        let sheet = compute_balances(&trip.members, &trip.expenses).unwrap();
        let rounded = RoundedBalances::from_sheet(&sheet, RoundingPolicy::Conserving, 2);
        let epsilon = Decimal::new(1, 2);

        group.bench_with_input(BenchmarkId::new("members", members), &rounded, |b, rounded| {
            b.iter(|| compute_settlements(black_box(rounded), epsilon))
        });
    }

    group.finish();
}

/// Exact solver, where the subset table dominates
fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for members in [8usize, 12, 16] {
        let trip = generate_trip(members, members * 10, 3);
        let engine = SettlementEngine::new(
            EngineConfig::default().with_strategy(SettlementStrategy::Exact { max_members: members }),
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("members", members), &trip, |b, trip| {
            b.iter(|| engine.settle(black_box(trip)))
        });
    }

    group.finish();
}

/// Full pipeline on a typical trip
fn bench_settle_trip(c: &mut Criterion) {
    let trip = generate_trip(12, 200, 4);
    let engine = SettlementEngine::default();

    c.bench_function("settle_typical_trip", |b| b.iter(|| engine.settle(black_box(&trip))));
}

criterion_group!(
    benches,
    bench_balances,
    bench_greedy,
    bench_exact,
    bench_settle_trip,
);
criterion_main!(benches);
