use core::fmt::{self, Debug};
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Address, Error, ProposalId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    Abstain,
    No,
    NoWithVeto,
}

/// Weight in parts per million; a full vote weighs `Weight::ONE`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Weight(u32);

impl Weight {
    pub const ONE: Weight = Weight(1_000_000);

    pub fn from_parts_per_million(ppm: u32) -> Self {
        Self(ppm)
    }

    pub fn parts_per_million(&self) -> u32 {
        self.0
    }
}

impl Debug for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ppm", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeightedVoteOption {
    pub option: VoteOption,
    pub weight: Weight,
}

/// Checks that a weighted option set is a single, complete vote: non-empty,
/// no option twice, every weight positive and the weights summing to `Weight::ONE`.
pub fn validate_options(options: &[WeightedVoteOption]) -> Result<()> {
    if options.is_empty() {
        return Err(Error::InvalidVote("no vote options".to_string()));
    }

    let mut seen = BTreeSet::new();
    let mut total: u64 = 0;
    for o in options {
        if !seen.insert(o.option) {
            return Err(Error::InvalidVote(format!("duplicate option {:?}", o.option)));
        }
        if o.weight.0 == 0 {
            return Err(Error::InvalidVote(format!("{:?} has zero weight", o.option)));
        }
        total += u64::from(o.weight.0);
    }

    if total != u64::from(Weight::ONE.0) {
        return Err(Error::InvalidVote(format!(
            "weights sum to {total}ppm, expected {:?}",
            Weight::ONE
        )));
    }
    Ok(())
}

/// A voter's ballot on a proposal. A re-vote replaces the previous record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: ProposalId,
    pub voter: Address,
    pub options: Vec<WeightedVoteOption>,
}

impl Vote {
    pub fn new(proposal_id: ProposalId, voter: Address, options: Vec<WeightedVoteOption>) -> Self {
        Self {
            proposal_id,
            voter,
            options,
        }
    }

    /// A vote putting its full weight behind one option.
    pub fn non_split(proposal_id: ProposalId, voter: Address, option: VoteOption) -> Self {
        Self::new(
            proposal_id,
            voter,
            vec![WeightedVoteOption {
                option,
                weight: Weight::ONE,
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(option: VoteOption, ppm: u32) -> WeightedVoteOption {
        WeightedVoteOption {
            option,
            weight: Weight::from_parts_per_million(ppm),
        }
    }

    #[test]
    fn test_split_vote_is_valid() {
        assert!(validate_options(&[
            opt(VoteOption::Yes, 600_000),
            opt(VoteOption::No, 400_000)
        ])
        .is_ok());
    }

    #[test]
    fn test_reject_bad_option_sets() {
        let bad = [
            vec![],
            vec![opt(VoteOption::Yes, 500_000)],
            vec![opt(VoteOption::Yes, 500_000), opt(VoteOption::Yes, 500_000)],
            vec![opt(VoteOption::Yes, 1_000_000), opt(VoteOption::No, 0)],
            vec![opt(VoteOption::Yes, 1_000_000), opt(VoteOption::No, 1)],
        ];
        for options in bad {
            assert!(
                matches!(validate_options(&options), Err(Error::InvalidVote(_))),
                "{options:?} should be rejected"
            );
        }
    }
}
