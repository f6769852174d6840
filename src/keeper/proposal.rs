use log::{info, warn};

use super::Keeper;
use crate::msg::{Action, Msg};
use crate::queue::{QueueIter, TimeQueue};
use crate::router::Router;
use crate::store::KvStore;
use crate::timestamp::{BlockHeader, Timestamp};
use crate::{keys, Address, Content, Error, Proposal, ProposalId, ProposalStatus, Result};

impl<S: KvStore, R: Router> Keeper<S, R> {
    /// Creates a proposal in its deposit period.
    ///
    /// Every message is checked before anything is written: a rejected submission
    /// leaves the store untouched and does not consume a proposal id.
    pub fn submit_proposal(
        &mut self,
        header: &BlockHeader,
        content: Content,
        messages: Vec<Action>,
    ) -> Result<Proposal> {
        for msg in messages.iter() {
            self.validate_proposal_msg(msg)?;
        }

        let id = self.get_proposal_id()?;
        let next_id = id.checked_add(1).ok_or(Error::ProposalIdOverflow)?;
        let submit_time = header.time;
        let deposit_end_time = submit_time.saturating_add(self.params().max_deposit_period);
        let proposal = Proposal::new(id, content, messages, submit_time, deposit_end_time);

        TimeQueue::INACTIVE.insert(&mut self.store, deposit_end_time, id)?;
        self.set_proposal(&proposal)?;
        self.set_proposal_id(next_id);

        info!(
            "[GOV] submitted {:?} at height {}, deposits close at {:?}",
            proposal, header.height, deposit_end_time
        );
        Ok(proposal)
    }

    fn validate_proposal_msg(&self, msg: &impl Msg) -> Result<()> {
        let signers = msg.signers();
        let signer = match signers.as_slice() {
            [signer] => *signer,
            _ => {
                return Err(Error::InvalidSigner(format!(
                    "expected exactly one signer, got {}",
                    signers.len()
                )))
            }
        };

        let signer: Address = signer
            .parse()
            .map_err(|e| Error::InvalidSigner(format!("{signer:?}: {e}")))?;
        if signer != self.governance_account() {
            return Err(Error::InvalidSigner(format!(
                "expected the governance account {} as signer, got {}",
                self.governance_account(),
                signer
            )));
        }

        msg.validate_basic()?;

        if !self.router.has_route(msg.route()) {
            return Err(Error::UnroutableProposalMsg {
                route: msg.route().to_string(),
            });
        }
        Ok(())
    }

    pub fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>> {
        self.get_record(&keys::proposal_key(id))
    }

    /// Stores `proposal` under its id, replacing any previous record. No validation.
    pub fn set_proposal(&mut self, proposal: &Proposal) -> Result<()> {
        self.set_record(keys::proposal_key(proposal.id), proposal)
    }

    /// Removes a proposal along with its queue entry, deposits and votes.
    pub fn delete_proposal(&mut self, id: ProposalId) -> Result<()> {
        let proposal = self.get_proposal(id)?.ok_or(Error::UnknownProposal(id))?;

        match proposal.status {
            ProposalStatus::DepositPeriod => {
                TimeQueue::INACTIVE.remove(&mut self.store, proposal.deposit_end_time, id)?
            }
            ProposalStatus::VotingPeriod => {
                let voting_end_time = voting_end_time(&proposal)?;
                TimeQueue::ACTIVE.remove(&mut self.store, voting_end_time, id)?
            }
            _ => (),
        }

        let deposits = self.delete_deposits(id);
        let votes = self.delete_votes(id);
        self.store.delete(&keys::proposal_key(id));
        info!(
            "[GOV] deleted {:?} with {} deposits and {} votes",
            proposal, deposits, votes
        );
        Ok(())
    }

    /// Lazily walks every stored proposal in ascending id order.
    pub fn proposals(&self) -> impl Iterator<Item = Result<Proposal>> + '_ {
        self.records_with_prefix(&[keys::PROPOSALS_PREFIX])
    }

    pub fn get_proposals(&self) -> Result<Vec<Proposal>> {
        self.proposals().collect()
    }

    /// The id the next submitted proposal will receive.
    pub fn get_proposal_id(&self) -> Result<ProposalId> {
        let bytes = self
            .store
            .get(&keys::proposal_id_key())
            .ok_or(Error::ProposalIdNotSet)?;
        keys::proposal_id_from_bytes(&bytes)
    }

    pub fn set_proposal_id(&mut self, id: ProposalId) {
        self.store.set(
            keys::proposal_id_key(),
            keys::proposal_id_bytes(id).to_vec(),
        );
    }

    /// Moves a proposal out of its deposit period and opens voting at the block time.
    ///
    /// The caller decides the deposit is sufficient. Activating anything but a queued
    /// deposit-period proposal is an invariant violation and nothing is written.
    pub fn activate_voting_period(
        &mut self,
        header: &BlockHeader,
        proposal: &mut Proposal,
    ) -> Result<()> {
        let id = proposal.id;
        if !proposal.status.can_transition_to(ProposalStatus::VotingPeriod) {
            warn!("[GOV] refusing to activate {:?}", proposal);
            return Err(Error::InvalidStatusTransition {
                id,
                from: proposal.status,
                to: ProposalStatus::VotingPeriod,
            });
        }
        TimeQueue::INACTIVE.ensure_contains(&self.store, proposal.deposit_end_time, id)?;
        if TimeQueue::ACTIVE.entry(&self.store, id)?.is_some() {
            return Err(Error::DuplicateQueueEntry {
                queue: TimeQueue::ACTIVE.kind(),
                id,
            });
        }

        let voting_start_time = header.time;
        let voting_end_time = voting_start_time.saturating_add(self.params().voting_period);

        TimeQueue::INACTIVE.remove(&mut self.store, proposal.deposit_end_time, id)?;
        proposal.voting_start_time = Some(voting_start_time);
        proposal.voting_end_time = Some(voting_end_time);
        proposal.status = ProposalStatus::VotingPeriod;
        self.set_proposal(proposal)?;
        TimeQueue::ACTIVE.insert(&mut self.store, voting_end_time, id)?;

        info!(
            "[GOV] voting opened on {:?} from {:?} to {:?}",
            proposal, voting_start_time, voting_end_time
        );
        Ok(())
    }

    /// Closes voting on a proposal with a terminal `outcome`.
    pub fn finalize_proposal(
        &mut self,
        proposal: &mut Proposal,
        outcome: ProposalStatus,
    ) -> Result<()> {
        let id = proposal.id;
        if proposal.status != ProposalStatus::VotingPeriod
            || !proposal.status.can_transition_to(outcome)
        {
            warn!("[GOV] refusing to finalize {:?} as {:?}", proposal, outcome);
            return Err(Error::InvalidStatusTransition {
                id,
                from: proposal.status,
                to: outcome,
            });
        }
        let voting_end_time = voting_end_time(proposal)?;

        TimeQueue::ACTIVE.remove(&mut self.store, voting_end_time, id)?;
        proposal.status = outcome;
        self.set_proposal(proposal)?;

        info!("[GOV] finalized {:?}", proposal);
        Ok(())
    }

    /// Proposals whose voting period ends at or before `upto`. Drop the iterator to release it.
    pub fn active_queue_iterator(&self, upto: Timestamp) -> QueueIter<'_> {
        TimeQueue::ACTIVE.iter(&self.store, upto)
    }

    /// Proposals whose deposit period ends at or before `upto`. Drop the iterator to release it.
    pub fn inactive_queue_iterator(&self, upto: Timestamp) -> QueueIter<'_> {
        TimeQueue::INACTIVE.iter(&self.store, upto)
    }
}

fn voting_end_time(proposal: &Proposal) -> Result<Timestamp> {
    proposal
        .voting_end_time
        .ok_or(Error::MissingVotingWindow(proposal.id))
}
