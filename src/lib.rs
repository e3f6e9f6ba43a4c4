//! # tripsettle
//!
//! Balances and debt settlement for shared trip expenses.
//!
//! ## Architecture
//!
//! - **Types**: Members, expenses, settlements and the settlement report
//! - **Ledger**: Folds expenses into one net balance per member
//! - **Engine**: Matches debtors with creditors into a short transfer list
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical inputs produce identical reports
//! 2. **No Floating Point**: All math uses `rust_decimal::Decimal`
//! 3. **Round Late**: Balances are rounded only when presented
//! 4. **Pure**: No I/O, no shared state; safe to call from many threads
//!
//! Persistence, validation and HTTP live outside this crate; callers hand
//! in a snapshot of a trip and get a [`SettlementReport`] back.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Member, Expense, Trip, Settlement, SettlementReport
pub mod types;

/// Balance ledger: per-member net balances and their rounding
pub mod ledger;

/// Settlement engine: greedy and exact matchers, engine facade
pub mod engine;

/// Engine configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::{BalanceLine, Expense, Member, MemberId, Settlement, SettlementReport, Trip, Warning};
pub use ledger::{compute_balances, BalanceSheet, RoundedBalances};
pub use engine::{compute_settlements, settle_sheet, SettlementEngine};
pub use config::{EngineConfig, RoundingPolicy, SettlementStrategy};
pub use error::SettleError;
