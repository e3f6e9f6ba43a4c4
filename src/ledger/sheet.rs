//! Balance sheet: one net balance per member.
//!
//! ## Folding Rule
//!
//! For each expense with `n` distinct participants:
//!
//! - the payer is credited the full amount
//! - every participant is debited `amount / n`
//!
//! A payer who also participates is credited and debited like anyone else,
//! which nets to owing only the other participants' shares.
//!
//! Balances stay unrounded here. Rounding happens in
//! [`RoundedBalances`](crate::ledger::RoundedBalances).

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{Result, SettleError};
use crate::types::{Expense, Member, MemberId, Settlement, Warning};

/// Running totals for one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBalance {
    pub id: MemberId,
    pub name: String,

    /// Sum of amounts this member paid
    pub paid: Decimal,

    /// Sum of shares debited to this member
    pub share: Decimal,

    /// Signed net, unrounded: positive is owed money, negative owes money
    pub balance: Decimal,
}

impl MemberBalance {
    fn new(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            paid: Decimal::ZERO,
            share: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}

/// Net balances for a set of members, in member order.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::ledger::compute_balances;
/// use tripsettle::types::{Expense, Member, MemberId};
///
/// let members = [Member::new(1, "Ann"), Member::new(2, "Bea")];
/// let expenses = [Expense::new("Fuel", Decimal::from(100), 1, [1, 2])];
///
/// let sheet = compute_balances(&members, &expenses).unwrap();
/// assert_eq!(sheet.get(MemberId(1)), Some(Decimal::from(50)));
/// assert_eq!(sheet.get(MemberId(2)), Some(Decimal::from(-50)));
/// assert_eq!(sheet.total(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BalanceSheet {
    entries: Vec<MemberBalance>,

    /// Member id to position in `entries`
    index: HashMap<MemberId, usize>,

    total_spent: Decimal,

    warnings: Vec<Warning>,
}

impl BalanceSheet {
    /// Sheet with every member at zero
    pub fn with_members(members: &[Member]) -> Self {
        let mut entries = Vec::with_capacity(members.len());
        let mut index = HashMap::with_capacity(members.len());

        for member in members {
            if index.contains_key(&member.id) {
                continue;
            }
            index.insert(member.id, entries.len());
            entries.push(MemberBalance::new(member));
        }

        Self {
            entries,
            index,
            total_spent: Decimal::ZERO,
            warnings: Vec::new(),
        }
    }

    // ========================================================================
    // Folding
    // ========================================================================

    /// Fold one expense into the sheet.
    ///
    /// Every referenced id is checked before anything is mutated, so a
    /// failed call leaves the sheet untouched.
    pub fn record(&mut self, expense: &Expense) -> Result<()> {
        let payer = self.position(expense.paid_by, expense)?;
        let participants = expense
            .participants()
            .into_iter()
            .map(|id| self.position(id, expense))
            .collect::<Result<Vec<_>>>()?;

        let Some(share) = expense.share() else {
            let label = expense.label();
            warn!(expense = %label, "expense has no participants, skipping");
            self.warnings.push(Warning::EmptyParticipants { expense: label });
            return Ok(());
        };

        let payer = &mut self.entries[payer];
        payer.paid += expense.amount;
        payer.balance += expense.amount;
        self.total_spent += expense.amount;

        for pos in participants {
            let entry = &mut self.entries[pos];
            entry.share += share;
            entry.balance -= share;
        }

        Ok(())
    }

    fn position(&self, id: MemberId, expense: &Expense) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or_else(|| SettleError::UnknownMember {
                expense: expense.label(),
                member: id,
            })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Unrounded balance of a member
    pub fn get(&self, id: MemberId) -> Option<Decimal> {
        self.entry(id).map(|e| e.balance)
    }

    pub fn entry(&self, id: MemberId) -> Option<&MemberBalance> {
        self.index.get(&id).map(|&pos| &self.entries[pos])
    }

    /// Entries in member order
    pub fn iter(&self) -> impl Iterator<Item = &MemberBalance> {
        self.entries.iter()
    }

    /// Sum of all balances; zero up to division precision
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|e| e.balance).sum()
    }

    /// Sum of all counted expense amounts
    pub fn total_spent(&self) -> Decimal {
        self.total_spent
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// Copy of the sheet with the settlements paid out.
    ///
    /// A giver's balance rises by the amount paid and the receiver's falls
    /// by the same amount. After a complete settlement every balance is
    /// within the epsilon of zero.
    pub fn apply(&self, settlements: &[Settlement]) -> Result<BalanceSheet> {
        let mut after = self.clone();
        for s in settlements {
            let from = after.settlement_position(s.from_id, s)?;
            let to = after.settlement_position(s.to_id, s)?;
            after.entries[from].balance += s.amount;
            after.entries[to].balance -= s.amount;
        }
        Ok(after)
    }

    fn settlement_position(&self, id: MemberId, settlement: &Settlement) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or_else(|| SettleError::UnknownSettlementParty {
                settlement: settlement.to_string(),
                member: id,
            })
    }

    /// Largest absolute balance, zero for an empty sheet
    pub fn max_abs_balance(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| e.balance.abs())
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Fold `expenses` into a fresh sheet over `members`.
///
/// Fails with [`SettleError::UnknownMember`] if an expense names a payer or
/// participant that is not in `members`. Expenses with no participants are
/// skipped and reported through [`BalanceSheet::warnings`].
pub fn compute_balances(members: &[Member], expenses: &[Expense]) -> Result<BalanceSheet> {
    let mut sheet = BalanceSheet::with_members(members);
    for expense in expenses {
        sheet.record(expense)?;
    }
    Ok(sheet)
}

// ============================================================================
// Unit Tests
// ============================================================================
