//! Property-based tests for settlement invariants
//!
//! These hold for every trip, not just hand-picked ones: balances sum to
//! zero, transfers settle every balance, results are reproducible and no
//! transfer is degenerate.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tripsettle::{
    compute_balances, EngineConfig, Expense, SettlementEngine, SettlementReport, SettlementStrategy, Trip,
};

const EPSILON: Decimal = dec!(0.01);

// ============================================================================
// Generators
// ============================================================================

/// Trips with 1-8 members and up to 20 expenses of 0.01 to 10,000.00
fn arb_trip() -> impl Strategy<Value = Trip> {
    (1usize..=8).prop_flat_map(|n| {
        let expense = (1i64..1_000_000, 0..n, prop::collection::vec(0..n, 1..=n));
        prop::collection::vec(expense, 0..20).prop_map(move |raw| {
            let mut trip = Trip::new("prop");
            for i in 0..n {
                trip = trip.member(i as u64 + 1, format!("M{}", i + 1));
            }
            for (k, (cents, payer, split)) in raw.into_iter().enumerate() {
                trip = trip.expense(Expense::new(
                    format!("E{}", k),
                    Decimal::new(cents, 2),
                    payer as u64 + 1,
                    split.into_iter().map(|i| i as u64 + 1),
                ));
            }
            trip
        })
    })
}

fn residuals(report: &SettlementReport) -> Vec<Decimal> {
    report
        .balances
        .iter()
        .map(|line| {
            let mut left = line.balance;
            for s in &report.settlements {
                if s.from_id == line.id {
                    left += s.amount;
                }
                if s.to_id == line.id {
                    left -= s.amount;
                }
            }
            left
        })
        .collect()
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: unrounded balances sum to zero, rounded ones exactly
    #[test]
    fn balances_are_zero_sum(trip in arb_trip()) {
        let sheet = compute_balances(&trip.members, &trip.expenses).unwrap();
        prop_assert!(sheet.total().abs() < EPSILON);

        let report = SettlementEngine::default().settle(&trip).unwrap();
        let total: Decimal = report.balances.iter().map(|b| b.balance).sum();
        prop_assert_eq!(total, Decimal::ZERO);
    }

    /// Property: applying every transfer zeroes the presented balances
    #[test]
    fn settlements_clear_all_balances(trip in arb_trip()) {
        let report = SettlementEngine::default().settle(&trip).unwrap();
        for left in residuals(&report) {
            prop_assert!(left.abs() < EPSILON, "residual {}", left);
        }
    }

    /// Property: applying every transfer leaves unrounded balances within epsilon
    #[test]
    fn settlements_clear_unrounded_balances(trip in arb_trip()) {
        let sheet = compute_balances(&trip.members, &trip.expenses).unwrap();
        let report = SettlementEngine::default().settle(&trip).unwrap();

        let after = sheet.apply(&report.settlements).unwrap();
        prop_assert!(after.max_abs_balance() < EPSILON);
    }

    /// Property: same input, same report
    #[test]
    fn settle_is_idempotent(trip in arb_trip()) {
        let engine = SettlementEngine::default();
        let a = engine.settle(&trip).unwrap();
        let b = engine.settle(&trip).unwrap();
        prop_assert_eq!(&a.fingerprint, &b.fingerprint);
        prop_assert_eq!(a, b);
    }

    /// Property: no self-payment, every amount positive
    #[test]
    fn transfers_are_well_formed(trip in arb_trip()) {
        let report = SettlementEngine::default().settle(&trip).unwrap();
        for s in &report.settlements {
            prop_assert_ne!(s.from_id, s.to_id);
            prop_assert!(s.amount > Decimal::ZERO);
        }
    }

    /// Property: at most one transfer fewer than the members with a balance
    #[test]
    fn transfer_count_is_bounded(trip in arb_trip()) {
        let report = SettlementEngine::default().settle(&trip).unwrap();
        let active = report.balances.iter().filter(|b| !b.balance.is_zero()).count();
        prop_assert!(report.transfer_count() <= active.saturating_sub(1));
    }

    /// Property: the exact strategy never needs more transfers than greedy
    #[test]
    fn exact_never_worse_than_greedy(trip in arb_trip()) {
        let greedy = SettlementEngine::default().settle(&trip).unwrap();
        let exact = SettlementEngine::new(EngineConfig::default().with_strategy(SettlementStrategy::exact()))
            .unwrap()
            .settle(&trip)
            .unwrap();

        prop_assert!(exact.transfer_count() <= greedy.transfer_count());
        prop_assert_eq!(&exact.balances, &greedy.balances);
        for left in residuals(&exact) {
            prop_assert!(left.abs() < EPSILON);
        }
    }
}
