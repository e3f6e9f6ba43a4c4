//! Presented balances: the sheet after rounding.
//!
//! This is the balance map the settlement matcher consumes. Each party
//! carries a signed amount already rounded to the presented decimal places.

use rust_decimal::Decimal;

use crate::config::RoundingPolicy;
use crate::ledger::BalanceSheet;
use crate::types::money::{round_conserving, round_independent};
use crate::types::MemberId;

/// One member's rounded, signed balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub id: MemberId,
    pub name: String,
    pub amount: Decimal,
}

impl Party {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }
}

/// Rounded balances in member order.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::config::RoundingPolicy;
/// use tripsettle::ledger::{compute_balances, RoundedBalances};
/// use tripsettle::types::{Expense, Member};
///
/// let members = [Member::new(1, "Ann"), Member::new(2, "Bea"), Member::new(3, "Cid")];
/// let expenses = [Expense::new("Dinner", Decimal::from(100), 1, [1, 2, 3])];
/// let sheet = compute_balances(&members, &expenses).unwrap();
///
/// let rounded = RoundedBalances::from_sheet(&sheet, RoundingPolicy::Conserving, 2);
/// assert_eq!(rounded.total(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedBalances {
    parties: Vec<Party>,
    decimal_places: u32,
}

impl RoundedBalances {
    /// Round every balance on the sheet with the given policy
    pub fn from_sheet(sheet: &BalanceSheet, policy: RoundingPolicy, decimal_places: u32) -> Self {
        let exact: Vec<Decimal> = sheet.iter().map(|e| e.balance).collect();
        let rounded = match policy {
            RoundingPolicy::Conserving => round_conserving(&exact, decimal_places),
            RoundingPolicy::Independent => round_independent(&exact, decimal_places),
        };

        let parties = sheet
            .iter()
            .zip(rounded)
            .map(|(entry, amount)| Party {
                id: entry.id,
                name: entry.name.clone(),
                amount,
            })
            .collect();

        Self {
            parties,
            decimal_places,
        }
    }

    /// Build directly from already-rounded parties
    pub fn from_parties(parties: Vec<Party>, decimal_places: u32) -> Self {
        Self {
            parties,
            decimal_places,
        }
    }

    #[inline]
    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.iter()
    }

    pub fn get(&self, id: MemberId) -> Option<Decimal> {
        self.parties.iter().find(|p| p.id == id).map(|p| p.amount)
    }

    pub fn total(&self) -> Decimal {
        self.parties.iter().map(|p| p.amount).sum()
    }

    /// Subset of the parties, keeping member order
    pub fn select(&self, positions: &[usize]) -> Self {
        let mut positions = positions.to_vec();
        positions.sort_unstable();
        positions.dedup();

        let parties = positions
            .into_iter()
            .filter_map(|i| self.parties.get(i).cloned())
            .collect();

        Self {
            parties,
            decimal_places: self.decimal_places,
        }
    }
}
