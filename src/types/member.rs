//! Trip members.
//!
//! Members are owned by the external store; the engine only reads them.
//! Their order in the input is the display order for balances and the
//! tie-break order for settlement matching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Member identifier, as assigned by the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl MemberId {
    /// Raw numeric id
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        MemberId(value)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person taking part in a trip.
///
/// ## Example
///
/// ```
/// use tripsettle::types::{Member, MemberId};
///
/// let alice = Member::new(1, "Alice");
/// assert_eq!(alice.id, MemberId(1));
/// assert_eq!(alice.name, "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_is_transparent_in_json() {
        let member = Member::new(7, "Bea");
        let json = serde_json::to_string(&member).unwrap();
        assert_eq!(json, r#"{"id":7,"name":"Bea"}"#);

        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn test_member_id_display() {
        assert_eq!(MemberId(42).to_string(), "42");
        assert_eq!(MemberId::from(3).get(), 3);
    }
}
