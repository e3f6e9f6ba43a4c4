//! Balance ledger for a trip.
//!
//! ## Components
//!
//! - [`BalanceSheet`]: unrounded net balance per member, folded from expenses
//! - [`RoundedBalances`]: the sheet rounded for presentation; input to the
//!   settlement matcher
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Fold one expense | O(p²) for p listed participants (dedup) |
//! | Lookup by member id | O(1) |
//! | Round the sheet | O(n log n) |

pub mod sheet;
pub mod rounded;

pub use sheet::{compute_balances, BalanceSheet, MemberBalance};
pub use rounded::{Party, RoundedBalances};
