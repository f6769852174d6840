use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Address, Error, Result};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

pub const DEFAULT_MIN_DEPOSIT: u128 = 10_000_000;
pub const DEFAULT_MAX_DEPOSIT_PERIOD: Duration = Duration::from_secs(2 * DAY.as_secs());
pub const DEFAULT_VOTING_PERIOD: Duration = Duration::from_secs(2 * DAY.as_secs());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Total deposit at which a proposal enters its voting period.
    pub min_deposit: u128,
    pub max_deposit_period: Duration,
    pub voting_period: Duration,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_deposit: DEFAULT_MIN_DEPOSIT,
            max_deposit_period: DEFAULT_MAX_DEPOSIT_PERIOD,
            voting_period: DEFAULT_VOTING_PERIOD,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        if self.min_deposit == 0 {
            return Err(Error::InvalidParams("min_deposit must be positive".to_string()));
        }
        if self.max_deposit_period.is_zero() {
            return Err(Error::InvalidParams(
                "max_deposit_period must be positive".to_string(),
            ));
        }
        if self.voting_period.is_zero() {
            return Err(Error::InvalidParams(
                "voting_period must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything the keeper is configured with at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeeperConfig {
    /// The governance module account, the only signer proposal messages may carry.
    pub governance_account: Address,
    pub params: Params,
}

impl KeeperConfig {
    pub fn new(governance_account: Address, params: Params) -> Self {
        Self {
            governance_account,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn test_reject_zero_params() {
        let zero_deposit = Params {
            min_deposit: 0,
            ..Default::default()
        };
        let zero_voting = Params {
            voting_period: Duration::ZERO,
            ..Default::default()
        };
        let zero_deposit_period = Params {
            max_deposit_period: Duration::ZERO,
            ..Default::default()
        };
        for p in [zero_deposit, zero_voting, zero_deposit_period] {
            assert!(matches!(p.validate(), Err(Error::InvalidParams(_))));
        }
    }

    #[test]
    fn test_params_encoding() {
        let params = Params::default();
        let bytes = bincode::serialize(&params).unwrap();
        assert_eq!(bincode::deserialize::<Params>(&bytes).unwrap(), params);
    }
}
