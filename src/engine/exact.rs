//! Minimum-transfer settlement for small groups.
//!
//! ## Idea
//!
//! With `n` non-zero balances, a settlement needs at least `n - k`
//! transfers, where `k` is the largest number of disjoint groups whose
//! balances each sum to zero. Settling each group on its own with the greedy
//! sweep reaches that bound: inside a zero-sum group every step settles one
//! party and the last step settles two.
//!
//! `k` is found with a dynamic program over subsets:
//!
//! ```text
//! best[mask] = max(best[mask \ {i}] for i in mask) + (sum(mask) == 0)
//! ```
//!
//! Walking back from the full set along maximal predecessors yields an
//! ordering whose zero-sum prefixes mark the group boundaries.
//!
//! The table has `2^n` entries, so the solver only runs up to a member limit
//! and falls back to the greedy matcher above it.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EXACT_HARD_LIMIT;
use crate::engine::matcher::compute_settlements;
use crate::ledger::RoundedBalances;
use crate::types::money::{is_negligible, to_minor_units};
use crate::types::Settlement;

/// Settle with the fewest transfers when at most `max_members` parties have
/// a non-negligible balance; otherwise fall back to the greedy matcher.
///
/// Groups are emitted in order of their first member; inside a group the
/// transfers follow the greedy sweep.
pub fn compute_exact_settlements(
    balances: &RoundedBalances,
    epsilon: Decimal,
    max_members: usize,
) -> Vec<Settlement> {
    let limit = max_members.min(EXACT_HARD_LIMIT);
    let dp = balances.decimal_places();

    let active: Vec<usize> = balances
        .iter()
        .enumerate()
        .filter(|(_, p)| !is_negligible(p.amount, epsilon))
        .map(|(i, _)| i)
        .collect();

    if active.len() > limit {
        debug!(active = active.len(), limit, "too many members for exact settlement, using greedy");
        return compute_settlements(balances, epsilon);
    }

    let parties: Vec<_> = balances.iter().collect();
    let units: Option<Vec<i64>> = active
        .iter()
        .map(|&i| to_minor_units(parties[i].amount, dp))
        .collect();
    let Some(units) = units else {
        debug!("balances out of range for exact settlement, using greedy");
        return compute_settlements(balances, epsilon);
    };

    let mut groups: Vec<Vec<usize>> = zero_sum_groups(&units)
        .into_iter()
        .map(|group| {
            let mut members: Vec<usize> = group.into_iter().map(|j| active[j]).collect();
            members.sort_unstable();
            members
        })
        .collect();
    groups.sort_by_key(|g| g.first().copied().unwrap_or(usize::MAX));

    debug!(
        active = active.len(),
        groups = groups.len(),
        "exact settlement partition"
    );

    groups
        .iter()
        .flat_map(|group| compute_settlements(&balances.select(group), epsilon))
        .collect()
}

/// Partition `values` into the largest number of zero-sum groups.
///
/// Returns groups of ascending indexes into `values`. If the values do not
/// sum to zero, the last group holds the leftover that cannot be balanced.
///
/// Subset sums are accumulated in `i128`, so any `i64` input is safe.
pub fn zero_sum_groups(values: &[i64]) -> Vec<Vec<usize>> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let states = 1usize << n;
    let full = states - 1;

    let mut sums = vec![0i128; states];
    for mask in 1..states {
        let low = mask.trailing_zeros() as usize;
        sums[mask] = sums[mask & (mask - 1)] + i128::from(values[low]);
    }

    let mut best = vec![0u8; states];
    for mask in 1..states {
        let mut max_prev = 0u8;
        let mut bits = mask;
        while bits != 0 {
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            max_prev = max_prev.max(best[mask & !(1 << i)]);
        }
        best[mask] = max_prev + u8::from(sums[mask] == 0);
    }

    // Peel one element at a time along a maximal predecessor
    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    while mask != 0 {
        let wanted = best[mask] - u8::from(sums[mask] == 0);
        let mut pick = mask.trailing_zeros() as usize;
        let mut bits = mask;
        while bits != 0 {
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            if best[mask & !(1 << i)] == wanted {
                pick = i;
                break;
            }
        }
        order.push(pick);
        mask &= !(1 << pick);
    }
    order.reverse();

    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut running = 0i128;
    for i in order {
        current.push(i);
        running += i128::from(values[i]);
        if running == 0 {
            groups.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }

    for group in &mut groups {
        group.sort_unstable();
    }
    groups
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Party;
    use crate::types::MemberId;
    use rust_decimal_macros::dec;

    const EPS: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    fn balances(amounts: &[Decimal]) -> RoundedBalances {
        RoundedBalances::from_parties(
            amounts
                .iter()
                .enumerate()
                .map(|(i, a)| Party::new(i as u64 + 1, format!("M{}", i + 1), *a))
                .collect(),
            2,
        )
    }

    fn sorted(mut groups: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        for g in &mut groups {
            g.sort_unstable();
        }
        groups.sort();
        groups
    }

    #[test]
    fn test_zero_sum_groups_basic() {
        assert!(zero_sum_groups(&[]).is_empty());
        assert_eq!(zero_sum_groups(&[5, -5]), vec![vec![0, 1]]);

        let groups = sorted(zero_sum_groups(&[50, 50, -30, -30, -20, -20]));
        assert_eq!(groups.len(), 2);
        for g in &groups {
            assert_eq!(g.len(), 3);
        }
    }

    #[test]
    fn test_zero_sum_groups_ascending_indexes() {
        for group in zero_sum_groups(&[3, -1, 7, -2, -7]) {
            assert!(group.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_zero_sum_groups_near_i64_limits() {
        let groups = sorted(zero_sum_groups(&[i64::MAX, -i64::MAX, i64::MAX, -i64::MAX]));
        assert_eq!(groups.len(), 2);
        for g in &groups {
            assert_eq!(g.len(), 2);
        }

        let groups = zero_sum_groups(&[i64::MAX, 1, i64::MIN]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_zero_sum_groups_pairs() {
        let groups = sorted(zero_sum_groups(&[10, -7, 7, -10]));
        assert_eq!(groups, vec![vec![0, 3], vec![1, 2]]);
    }

    #[test]
    fn test_zero_sum_groups_leftover() {
        let groups = zero_sum_groups(&[4, -4, 1]);
        assert_eq!(groups.len(), 2);
        let leftover_sum: i64 = groups[1].iter().map(|&i| [4, -4, 1][i]).sum();
        assert_eq!(leftover_sum, 1);
    }

    #[test]
    fn test_exact_beats_greedy() {
        let b = balances(&[dec!(50), dec!(50), dec!(-30), dec!(-30), dec!(-20), dec!(-20)]);

        assert_eq!(compute_settlements(&b, EPS).len(), 5);
        let exact = compute_exact_settlements(&b, EPS, 16);
        assert_eq!(exact.len(), 4);

        let mut net = vec![Decimal::ZERO; 6];
        for s in &exact {
            net[(s.from_id.get() - 1) as usize] += s.amount;
            net[(s.to_id.get() - 1) as usize] -= s.amount;
        }
        for (start, delta) in b.iter().zip(&net) {
            assert_eq!(start.amount + delta, Decimal::ZERO);
        }
    }

    #[test]
    fn test_exact_groups_emitted_by_first_member() {
        let b = balances(&[dec!(10), dec!(-7), dec!(7), dec!(-10)]);
        let s = compute_exact_settlements(&b, EPS, 16);

        assert_eq!(s.len(), 2);
        assert_eq!((s[0].from_id, s[0].to_id), (MemberId(4), MemberId(1)));
        assert_eq!((s[1].from_id, s[1].to_id), (MemberId(2), MemberId(3)));
    }

    #[test]
    fn test_exact_handles_balances_near_minor_unit_limit() {
        // 5e16 is 5e18 cents: each fits in i64, any two of them do not
        let big = Decimal::new(50_000_000_000_000_000, 0);
        let b = balances(&[big, -big, big, -big]);
        let s = compute_exact_settlements(&b, EPS, 16);

        assert_eq!(s.len(), 2);
        assert_eq!((s[0].from_id, s[0].to_id, s[0].amount), (MemberId(2), MemberId(1), big));
        assert_eq!((s[1].from_id, s[1].to_id, s[1].amount), (MemberId(4), MemberId(3), big));
    }

    #[test]
    fn test_exact_falls_back_above_limit() {
        let b = balances(&[dec!(50), dec!(50), dec!(-30), dec!(-30), dec!(-20), dec!(-20)]);
        let s = compute_exact_settlements(&b, EPS, 4);
        assert_eq!(s, compute_settlements(&b, EPS));
    }

    #[test]
    fn test_exact_ignores_zero_balances() {
        let b = balances(&[dec!(0), dec!(25), dec!(0), dec!(-25)]);
        let s = compute_exact_settlements(&b, EPS, 2);

        assert_eq!(s.len(), 1);
        assert_eq!((s[0].from_id, s[0].to_id), (MemberId(4), MemberId(2)));
    }
}
