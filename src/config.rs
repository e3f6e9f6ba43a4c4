//! Engine configuration.
//!
//! Every field has a default matching the reference behavior except the
//! rounding policy, which defaults to [`RoundingPolicy::Conserving`] so that
//! presented balances always sum to zero.
//!
//! ```
//! use tripsettle::config::{EngineConfig, RoundingPolicy, SettlementStrategy};
//!
//! let config: EngineConfig = serde_json::from_str(r#"{"strategy": {"exact": {"max_members": 10}}}"#).unwrap();
//! assert_eq!(config.strategy, SettlementStrategy::Exact { max_members: 10 });
//! assert_eq!(config.rounding, RoundingPolicy::Conserving);
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettleError};
use crate::types::money::{DEFAULT_DECIMAL_PLACES, DEFAULT_EPSILON};

/// Largest member count the exact solver accepts (2^20 subset states)
pub const EXACT_HARD_LIMIT: usize = 20;

/// Default member limit for the exact solver before falling back to greedy
pub const EXACT_DEFAULT_LIMIT: usize = 16;

/// How unrounded balances become presented balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Largest-remainder rounding; rounded balances sum to the rounded total
    #[default]
    Conserving,
    /// Each balance rounded on its own; may leave a stray cent
    Independent,
}

impl FromStr for RoundingPolicy {
    type Err = SettleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conserving" => Ok(RoundingPolicy::Conserving),
            "independent" => Ok(RoundingPolicy::Independent),
            other => Err(SettleError::InvalidConfig(format!("unknown rounding policy \"{}\"", other))),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::Conserving => f.write_str("conserving"),
            RoundingPolicy::Independent => f.write_str("independent"),
        }
    }
}

/// Which algorithm turns balances into transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStrategy {
    /// Largest-first two-pointer sweep
    #[default]
    Greedy,
    /// Minimum transfer count via zero-sum subset search, greedy above the limit
    Exact { max_members: usize },
}

impl SettlementStrategy {
    pub fn exact() -> Self {
        SettlementStrategy::Exact {
            max_members: EXACT_DEFAULT_LIMIT,
        }
    }
}

impl FromStr for SettlementStrategy {
    type Err = SettleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(SettlementStrategy::Greedy),
            "exact" => Ok(SettlementStrategy::exact()),
            other => Err(SettleError::InvalidConfig(format!("unknown strategy \"{}\"", other))),
        }
    }
}

impl fmt::Display for SettlementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementStrategy::Greedy => f.write_str("greedy"),
            SettlementStrategy::Exact { max_members } => write!(f, "exact(max_members={})", max_members),
        }
    }
}

/// Tunables for [`SettlementEngine`](crate::engine::SettlementEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Remainders strictly below this are treated as settled
    pub epsilon: Decimal,

    /// Decimal places used for presented balances and payments
    pub decimal_places: u32,

    pub rounding: RoundingPolicy,

    pub strategy: SettlementStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            rounding: RoundingPolicy::default(),
            strategy: SettlementStrategy::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_strategy(mut self, strategy: SettlementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingPolicy) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_epsilon(mut self, epsilon: Decimal) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.epsilon <= Decimal::ZERO {
            return Err(SettleError::InvalidConfig(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if self.decimal_places > 8 {
            return Err(SettleError::InvalidConfig(format!(
                "decimal_places must be at most 8, got {}",
                self.decimal_places
            )));
        }
        if let SettlementStrategy::Exact { max_members } = self.strategy {
            if max_members > EXACT_HARD_LIMIT {
                return Err(SettleError::InvalidConfig(format!(
                    "exact strategy supports at most {} members, got {}",
                    EXACT_HARD_LIMIT, max_members
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.epsilon, dec!(0.01));
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.rounding, RoundingPolicy::Conserving);
        assert_eq!(config.strategy, SettlementStrategy::Greedy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig::default().with_epsilon(Decimal::ZERO);
        assert!(matches!(config.validate(), Err(SettleError::InvalidConfig(_))));

        let config = EngineConfig::default().with_strategy(SettlementStrategy::Exact { max_members: 21 });
        assert!(matches!(config.validate(), Err(SettleError::InvalidConfig(_))));

        let config = EngineConfig {
            decimal_places: 12,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("Greedy".parse::<SettlementStrategy>().unwrap(), SettlementStrategy::Greedy);
        assert_eq!("exact".parse::<SettlementStrategy>().unwrap(), SettlementStrategy::exact());
        assert!("optimal".parse::<SettlementStrategy>().is_err());

        assert_eq!("independent".parse::<RoundingPolicy>().unwrap(), RoundingPolicy::Independent);
        assert!("bankers".parse::<RoundingPolicy>().is_err());
    }
}
