//! Greedy settlement matcher.
//!
//! ## Algorithm
//!
//! 1. Split parties into givers (negative balance, stored as the positive
//!    amount owed) and receivers (positive balance).
//! 2. Sort both lists by amount, largest first. The sort is stable, so equal
//!    amounts keep member order.
//! 3. Sweep with one pointer per list. Each step pays
//!    `min(giver, receiver)` and subtracts it from both.
//! 4. A pointer advances once its remaining amount drops below the epsilon.
//!
//! Every step settles at least one party, so there are at most
//! `givers + receivers - 1` transfers. The count is not guaranteed minimal;
//! see [`exact`](crate::engine::exact) for that.

use rust_decimal::Decimal;

use crate::ledger::RoundedBalances;
use crate::types::money::round_money;
use crate::types::{MemberId, Settlement};

/// Outstanding amount for one side of the sweep.
#[derive(Debug, Clone)]
struct Position<'a> {
    id: MemberId,
    name: &'a str,
    remaining: Decimal,
}

/// Split parties into (givers, receivers), each sorted largest first.
fn split_positions(balances: &RoundedBalances) -> (Vec<Position<'_>>, Vec<Position<'_>>) {
    let mut givers = Vec::new();
    let mut receivers = Vec::new();

    for party in balances.iter() {
        let position = Position {
            id: party.id,
            name: &party.name,
            remaining: party.amount.abs(),
        };
        if party.amount < Decimal::ZERO {
            givers.push(position);
        } else if party.amount > Decimal::ZERO {
            receivers.push(position);
        }
    }

    givers.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    receivers.sort_by(|a, b| b.remaining.cmp(&a.remaining));

    (givers, receivers)
}

/// `true` once a position no longer needs to pay or receive
#[inline]
fn is_settled(remaining: Decimal, epsilon: Decimal) -> bool {
    remaining <= Decimal::ZERO || remaining < epsilon
}

/// Compute transfers that bring every balance within `epsilon` of zero.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::engine::compute_settlements;
/// use tripsettle::ledger::{Party, RoundedBalances};
/// use tripsettle::types::MemberId;
///
/// let balances = RoundedBalances::from_parties(
///     vec![
///         Party::new(1, "Ann", Decimal::from(60)),
///         Party::new(2, "Bea", Decimal::ZERO),
///         Party::new(3, "Cid", Decimal::from(-60)),
///     ],
///     2,
/// );
///
/// let settlements = compute_settlements(&balances, Decimal::new(1, 2));
/// assert_eq!(settlements.len(), 1);
/// assert_eq!(settlements[0].from_id, MemberId(3));
/// assert_eq!(settlements[0].to_id, MemberId(1));
/// assert_eq!(settlements[0].amount, Decimal::from(60));
/// ```
pub fn compute_settlements(balances: &RoundedBalances, epsilon: Decimal) -> Vec<Settlement> {
    let dp = balances.decimal_places();
    let (mut givers, mut receivers) = split_positions(balances);

    let mut settlements = Vec::with_capacity(givers.len() + receivers.len());
    let (mut g, mut r) = (0, 0);

    while g < givers.len() && r < receivers.len() {
        let giver = &mut givers[g];
        let receiver = &mut receivers[r];

        let payment = giver.remaining.min(receiver.remaining);
        if payment > Decimal::ZERO {
            let amount = round_money(payment, dp);
            if amount > Decimal::ZERO {
                settlements.push(Settlement::new(
                    giver.id,
                    giver.name,
                    receiver.id,
                    receiver.name,
                    amount,
                ));
            }
        }

        giver.remaining -= payment;
        receiver.remaining -= payment;

        if is_settled(giver.remaining, epsilon) {
            g += 1;
        }
        if is_settled(receiver.remaining, epsilon) {
            r += 1;
        }
    }

    settlements
}

// ============================================================================
// Unit Tests
// ============================================================================
