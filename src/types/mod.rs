//! Core data types for trip settlement
//!
//! Inputs come from the external trip store; outputs are handed back to the
//! API layer for display. All amounts are `rust_decimal::Decimal`.
//!
//! ## Types
//!
//! - [`Member`] / [`MemberId`]: a person on the trip
//! - [`Expense`]: a cost paid by one member, shared by a set of members
//! - [`Trip`]: snapshot of members and expenses
//! - [`Settlement`]: one proposed payment between two members
//! - [`SettlementReport`]: balances, settlements and warnings for a trip
//!
//! ## Money
//!
//! Rounding and formatting helpers live in [`money`]. Balances are kept at
//! full precision and only rounded on the way out.

mod member;
mod expense;
mod settlement;
mod report;
pub mod money;

pub use member::{Member, MemberId};
pub use expense::{Expense, Trip};
pub use settlement::Settlement;
pub use report::{BalanceLine, SettlementReport, Warning};
