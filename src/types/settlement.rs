//! A single proposed payment between two members.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::MemberId;

/// A settlement moves money from a member who owes (giver) to a member who
/// is owed (receiver).
///
/// ## JSON
///
/// Serialized with the keys the trip API exposes: `from`, `from_id`, `to`,
/// `to_id`, `amount`. The amount is a JSON number rounded to the presented
/// decimal places.
///
/// ## Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tripsettle::types::{MemberId, Settlement};
///
/// let s = Settlement::new(MemberId(2), "Bea", MemberId(1), "Ann", Decimal::from(50));
/// assert_eq!(s.to_string(), "Bea pays Ann 50.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    #[serde(rename = "from")]
    pub from_name: String,

    pub from_id: MemberId,

    #[serde(rename = "to")]
    pub to_name: String,

    pub to_id: MemberId,

    /// Always strictly positive
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Settlement {
    pub fn new(
        from_id: MemberId,
        from_name: impl Into<String>,
        to_id: MemberId,
        to_name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            from_id,
            to_name: to_name.into(),
            to_id,
            amount,
        }
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {:.2}", self.from_name, self.to_name, self.amount)
    }
}
