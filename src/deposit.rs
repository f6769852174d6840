use serde::{Deserialize, Serialize};

use crate::{Address, ProposalId};

/// The total a depositor has put behind a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub proposal_id: ProposalId,
    pub depositor: Address,
    pub amount: u128,
}

impl Deposit {
    pub fn new(proposal_id: ProposalId, depositor: Address, amount: u128) -> Self {
        Self {
            proposal_id,
            depositor,
            amount,
        }
    }
}
