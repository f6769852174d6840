use log::info;

use super::Keeper;
use crate::router::Router;
use crate::store::KvStore;
use crate::vote::{validate_options, WeightedVoteOption};
use crate::{keys, Address, Error, ProposalId, ProposalStatus, Result, Vote};

impl<S: KvStore, R: Router> Keeper<S, R> {
    pub fn get_vote(&self, proposal_id: ProposalId, voter: &Address) -> Result<Option<Vote>> {
        self.get_record(&keys::vote_key(proposal_id, voter))
    }

    /// Stores `vote`, replacing the voter's previous vote on that proposal.
    pub fn set_vote(&mut self, vote: &Vote) -> Result<()> {
        self.set_record(keys::vote_key(vote.proposal_id, &vote.voter), vote)
    }

    /// Votes on a proposal, ordered by voter address.
    pub fn votes(&self, proposal_id: ProposalId) -> impl Iterator<Item = Result<Vote>> + '_ {
        self.records_with_prefix(&keys::votes_key(proposal_id))
    }

    pub fn get_votes(&self, proposal_id: ProposalId) -> Result<Vec<Vote>> {
        self.votes(proposal_id).collect()
    }

    pub fn delete_votes(&mut self, proposal_id: ProposalId) -> usize {
        self.delete_prefix(&keys::votes_key(proposal_id))
    }

    /// Records a vote on a proposal in its voting period. Re-voting overwrites.
    pub fn add_vote(
        &mut self,
        proposal_id: ProposalId,
        voter: Address,
        options: Vec<WeightedVoteOption>,
    ) -> Result<()> {
        let proposal = self
            .get_proposal(proposal_id)?
            .ok_or(Error::UnknownProposal(proposal_id))?;
        if proposal.status != ProposalStatus::VotingPeriod {
            return Err(Error::InactiveProposal {
                id: proposal_id,
                status: proposal.status,
            });
        }
        validate_options(&options)?;

        self.set_vote(&Vote::new(proposal_id, voter, options))?;
        info!("[GOV] {:?} voted on {:?}", voter, proposal);
        Ok(())
    }
}
