//! Expenses and trip snapshots.
//!
//! An expense is paid in full by one member and shared evenly between a set
//! of participants. The payer may or may not be one of the participants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Member, MemberId};

/// A single shared cost.
///
/// ## Participants
///
/// `split_between` is a set: duplicate ids collapse to their first
/// occurrence (see [`Expense::participants`]) and order does not affect
/// balances.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::types::{Expense, MemberId};
///
/// let dinner = Expense::new("Dinner", Decimal::from(90), 1, [1, 2, 3]);
/// assert_eq!(dinner.paid_by, MemberId(1));
/// assert_eq!(dinner.share(), Some(Decimal::from(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store identity, used only in diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub title: String,

    /// Positive amount in the trip currency
    pub amount: Decimal,

    /// Member who paid the full amount
    pub paid_by: MemberId,

    /// Members sharing the cost
    #[serde(default)]
    pub split_between: Vec<MemberId>,
}

impl Expense {
    pub fn new<I, M>(title: impl Into<String>, amount: Decimal, paid_by: impl Into<MemberId>, split_between: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MemberId>,
    {
        Self {
            id: None,
            title: title.into(),
            amount,
            paid_by: paid_by.into(),
            split_between: split_between.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach the store id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Distinct participants, in first-occurrence order
    pub fn participants(&self) -> Vec<MemberId> {
        let mut seen = Vec::with_capacity(self.split_between.len());
        for id in &self.split_between {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
        seen
    }

    /// Per-participant share, unrounded
    ///
    /// Returns `None` when nobody shares the expense.
    pub fn share(&self) -> Option<Decimal> {
        let count = self.participants().len();
        if count == 0 {
            return None;
        }
        self.amount.checked_div(Decimal::from(count as u64))
    }

    /// Human label used in errors and warnings: `#id title` or just the title
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format!("#{} {}", id, self.title),
            None => self.title.clone(),
        }
    }
}

/// Snapshot of a trip as supplied by the external store.
///
/// Deserializes from the same JSON shape the trip API returns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub members: Vec<Member>,

    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Trip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn member(mut self, id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        self.members.push(Member::new(id, name));
        self
    }

    pub fn expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }
}
