//! Settlement report returned to the caller.
//!
//! The report bundles the presented balances, the transfers that settle
//! them and any warnings raised while folding expenses. It carries a
//! SHA-256 fingerprint over a canonical encoding so callers can cache or
//! compare results without diffing JSON.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::money::{format_money, DEFAULT_DECIMAL_PLACES};
use crate::types::{MemberId, Settlement};

/// Non-fatal issue found while computing balances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Expense with nobody to split it between; it contributed nothing
    EmptyParticipants { expense: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyParticipants { expense } => {
                write!(f, "expense \"{}\" has no participants and was skipped", expense)
            }
        }
    }
}

/// One member's presented balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLine {
    pub id: MemberId,
    pub name: String,

    /// Total this member paid for
    #[serde(with = "rust_decimal::serde::float")]
    pub paid: Decimal,

    /// Total of this member's shares
    #[serde(with = "rust_decimal::serde::float")]
    pub share: Decimal,

    /// Signed net: positive is owed money, negative owes money
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Result of settling one trip.
///
/// ## Example
///
/// ```
/// use tripsettle::types::SettlementReport;
///
/// let report = SettlementReport::new(vec![], vec![], Default::default(), vec![]);
/// assert!(report.is_settled());
/// assert_eq!(report.fingerprint.len(), 64);
/// assert!(report.verify_fingerprint());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    /// Balances in member order
    pub balances: Vec<BalanceLine>,

    /// Transfers in emission order
    pub settlements: Vec<Settlement>,

    /// Sum of all counted expenses
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spent: Decimal,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,

    /// Places every amount was rounded to; the fingerprint encodes at this scale
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,

    /// Hex SHA-256 of the canonical encoding
    pub fingerprint: String,
}

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

impl SettlementReport {
    /// Build a report at the default scale and compute its fingerprint
    pub fn new(
        balances: Vec<BalanceLine>,
        settlements: Vec<Settlement>,
        total_spent: Decimal,
        warnings: Vec<Warning>,
    ) -> Self {
        let mut report = Self {
            balances,
            settlements,
            total_spent,
            warnings,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            fingerprint: String::new(),
        };
        report.fingerprint = report.compute_fingerprint();
        report
    }

    /// Re-scale the canonical encoding and recompute the fingerprint
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self.fingerprint = self.compute_fingerprint();
        self
    }

    /// Nobody owes anybody
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Presented balance for a member
    pub fn balance_of(&self, id: MemberId) -> Option<Decimal> {
        self.balances.iter().find(|b| b.id == id).map(|b| b.balance)
    }

    /// Number of transfers
    pub fn transfer_count(&self) -> usize {
        self.settlements.len()
    }

    /// Recompute the fingerprint from the current contents
    pub fn compute_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check the stored fingerprint still matches the contents
    pub fn verify_fingerprint(&self) -> bool {
        self.fingerprint == self.compute_fingerprint()
    }

    /// Fixed field order, length-prefixed strings, fixed-scale amounts.
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let dp = self.decimal_places;

        write_u64(&mut buf, u64::from(dp));

        write_u64(&mut buf, self.balances.len() as u64);
        for line in &self.balances {
            write_u64(&mut buf, line.id.get());
            write_str(&mut buf, &line.name);
            write_amount(&mut buf, line.paid, dp);
            write_amount(&mut buf, line.share, dp);
            write_amount(&mut buf, line.balance, dp);
        }

        write_u64(&mut buf, self.settlements.len() as u64);
        for s in &self.settlements {
            write_u64(&mut buf, s.from_id.get());
            write_u64(&mut buf, s.to_id.get());
            write_amount(&mut buf, s.amount, dp);
        }

        write_amount(&mut buf, self.total_spent, dp);

        write_u64(&mut buf, self.warnings.len() as u64);
        for w in &self.warnings {
            write_str(&mut buf, &w.to_string());
        }

        buf
    }
}

fn write_u64(buf: &mut Vec<u8>, n: u64) {
    buf.extend_from_slice(&n.to_be_bytes());
}

fn write_str(buf: &mut Vec<u8>, s: &str) {
    write_u64(buf, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn write_amount(buf: &mut Vec<u8>, d: Decimal, dp: u32) {
    write_str(buf, &format_money(d, dp));
}

// ============================================================================
// Unit Tests
// ============================================================================
