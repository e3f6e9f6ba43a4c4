//! Settlement engine for trip expenses.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: same members and expenses, same report (and fingerprint)
//! 2. **Decimal Math**: no floating point until JSON output
//! 3. **Stateless**: every call recomputes from the supplied snapshot
//! 4. **Largest First**: biggest debts are matched against biggest credits
//!
//! ## Pipeline
//!
//! ```text
//! members + expenses -> BalanceSheet -> RoundedBalances -> settlements -> SettlementReport
//! ```
//!
//! ## Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use tripsettle::engine::SettlementEngine;
//! use tripsettle::types::{Expense, MemberId, Trip};
//!
//! let trip = Trip::new("Lisbon")
//!     .member(1, "Ann")
//!     .member(2, "Bea")
//!     .expense(Expense::new("Hostel", Decimal::from(100), 1, [1, 2]));
//!
//! let report = SettlementEngine::default().settle(&trip).unwrap();
//!
//! assert_eq!(report.balance_of(MemberId(1)), Some(Decimal::from(50)));
//! assert_eq!(report.settlements.len(), 1);
//! assert_eq!(report.settlements[0].to_string(), "Bea pays Ann 50.00");
//! ```

pub mod matcher;
pub mod exact;

pub use matcher::compute_settlements;
pub use exact::compute_exact_settlements;

use tracing::{debug, info, info_span};

use crate::config::{EngineConfig, SettlementStrategy};
use crate::error::Result;
use crate::ledger::{compute_balances, BalanceSheet, RoundedBalances};
use crate::types::money::round_money;
use crate::types::{BalanceLine, Expense, Member, Settlement, SettlementReport, Trip};

/// Round a sheet and turn it into transfers with the configured strategy.
pub fn settle_sheet(sheet: &BalanceSheet, config: &EngineConfig) -> Vec<Settlement> {
    let rounded = RoundedBalances::from_sheet(sheet, config.rounding, config.decimal_places);
    match_balances(&rounded, config)
}

fn match_balances(rounded: &RoundedBalances, config: &EngineConfig) -> Vec<Settlement> {
    match config.strategy {
        SettlementStrategy::Greedy => compute_settlements(rounded, config.epsilon),
        SettlementStrategy::Exact { max_members } => {
            compute_exact_settlements(rounded, config.epsilon, max_members)
        }
    }
}

/// Stateless settlement engine.
///
/// Holds only its configuration, so one instance can be shared freely
/// between threads and calls.
#[derive(Debug, Clone, Default)]
pub struct SettlementEngine {
    config: EngineConfig,
}

impl SettlementEngine {
    /// Create an engine, rejecting an invalid configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Settle a trip snapshot
    pub fn settle(&self, trip: &Trip) -> Result<SettlementReport> {
        let span = info_span!("settle_trip", trip_id = ?trip.id, trip = %trip.name);
        let _enter = span.enter();
        self.settle_parts(&trip.members, &trip.expenses)
    }

    /// Settle members and expenses supplied separately
    pub fn settle_parts(&self, members: &[Member], expenses: &[Expense]) -> Result<SettlementReport> {
        let span = info_span!(
            "settle",
            members = members.len(),
            expenses = expenses.len(),
            strategy = %self.config.strategy,
        );
        let _enter = span.enter();

        let dp = self.config.decimal_places;
        let sheet = compute_balances(members, expenses)?;
        debug!(total = %sheet.total(), spent = %sheet.total_spent(), "balances computed");

        let rounded = RoundedBalances::from_sheet(&sheet, self.config.rounding, dp);
        let settlements = match_balances(&rounded, &self.config);
        for s in &settlements {
            debug!(from = %s.from_id, to = %s.to_id, amount = %s.amount, "settlement");
        }

        let balances = sheet
            .iter()
            .zip(rounded.iter())
            .map(|(entry, party)| BalanceLine {
                id: entry.id,
                name: entry.name.clone(),
                paid: round_money(entry.paid, dp),
                share: round_money(entry.share, dp),
                balance: party.amount,
            })
            .collect();

        let report = SettlementReport::new(
            balances,
            settlements,
            round_money(sheet.total_spent(), dp),
            sheet.warnings().to_vec(),
        )
        .with_decimal_places(dp);

        info!(
            transfers = report.transfer_count(),
            warnings = report.warnings.len(),
            "trip settled"
        );

        Ok(report)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
