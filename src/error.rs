//! Errors the engine can return.
//!
//! - [`UnknownMember`] when an expense names a payer or participant that is
//!   not in the member list. This points at a data-integrity problem
//!   upstream and is never silently ignored.
//! - [`UnknownSettlementParty`] when a settlement applied to a balance
//!   sheet names a member the sheet does not hold.
//! - [`InvalidConfig`] when an [`EngineConfig`] fails validation.
//!
//! Expenses with no participants are not errors; they surface as
//! [`Warning`]s on the report.
//!
//!  [`UnknownMember`]: SettleError::UnknownMember
//!  [`UnknownSettlementParty`]: SettleError::UnknownSettlementParty
//!  [`InvalidConfig`]: SettleError::InvalidConfig
//!  [`EngineConfig`]: crate::config::EngineConfig
//!  [`Warning`]: crate::types::Warning

use thiserror::Error;

use crate::types::MemberId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettleError {
    #[error("expense \"{expense}\" references unknown member {member}")]
    UnknownMember { expense: String, member: MemberId },

    #[error("settlement \"{settlement}\" references unknown member {member}")]
    UnknownSettlementParty { settlement: String, member: MemberId },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SettleError>;
