use log::info;

use super::Keeper;
use crate::queue::TimeQueue;
use crate::router::Router;
use crate::store::KvStore;
use crate::timestamp::BlockHeader;
use crate::{keys, Address, Deposit, Error, ProposalId, ProposalStatus, Result};

impl<S: KvStore, R: Router> Keeper<S, R> {
    pub fn get_deposit(
        &self,
        proposal_id: ProposalId,
        depositor: &Address,
    ) -> Result<Option<Deposit>> {
        self.get_record(&keys::deposit_key(proposal_id, depositor))
    }

    /// Stores `deposit`, replacing the depositor's previous record for that proposal.
    pub fn set_deposit(&mut self, deposit: &Deposit) -> Result<()> {
        self.set_record(
            keys::deposit_key(deposit.proposal_id, &deposit.depositor),
            deposit,
        )
    }

    /// Deposits on a proposal, ordered by depositor address.
    pub fn deposits(&self, proposal_id: ProposalId) -> impl Iterator<Item = Result<Deposit>> + '_ {
        self.records_with_prefix(&keys::deposits_key(proposal_id))
    }

    pub fn get_deposits(&self, proposal_id: ProposalId) -> Result<Vec<Deposit>> {
        self.deposits(proposal_id).collect()
    }

    /// Drops every deposit record on a proposal. Moving the funds is up to the caller.
    pub fn delete_deposits(&mut self, proposal_id: ProposalId) -> usize {
        self.delete_prefix(&keys::deposits_key(proposal_id))
    }

    /// Adds `amount` to the depositor's stake on a proposal in its deposit period.
    ///
    /// Returns `true` if this deposit lifted the proposal to the minimum deposit
    /// and voting was opened.
    pub fn add_deposit(
        &mut self,
        header: &BlockHeader,
        proposal_id: ProposalId,
        depositor: Address,
        amount: u128,
    ) -> Result<bool> {
        if amount == 0 {
            return Err(Error::InvalidDepositAmount);
        }
        let mut proposal = self
            .get_proposal(proposal_id)?
            .ok_or(Error::UnknownProposal(proposal_id))?;
        if proposal.status != ProposalStatus::DepositPeriod {
            return Err(Error::InactiveProposal {
                id: proposal_id,
                status: proposal.status,
            });
        }

        TimeQueue::INACTIVE.ensure_contains(&self.store, proposal.deposit_end_time, proposal_id)?;

        let mut deposit = self
            .get_deposit(proposal_id, &depositor)?
            .unwrap_or_else(|| Deposit::new(proposal_id, depositor, 0));
        deposit.amount = deposit.amount.saturating_add(amount);
        proposal.total_deposit = proposal.total_deposit.saturating_add(amount);

        self.set_deposit(&deposit)?;
        self.set_proposal(&proposal)?;
        info!(
            "[GOV] {:?} deposited {} on {:?}, total {}",
            depositor, amount, proposal, proposal.total_deposit
        );

        if proposal.total_deposit >= self.params().min_deposit {
            self.activate_voting_period(header, &mut proposal)?;
            return Ok(true);
        }
        Ok(false)
    }
}
