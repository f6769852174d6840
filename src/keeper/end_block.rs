use log::info;

use super::Keeper;
use crate::queue::QueueKind;
use crate::router::Router;
use crate::store::KvStore;
use crate::timestamp::BlockHeader;
use crate::{Error, Proposal, ProposalId, ProposalStatus, Result, Vote};

/// Decides the outcome of a proposal whose voting period has ended.
pub trait Tally {
    /// Must return `Passed`, `Rejected` or `Failed`.
    fn outcome(&self, proposal: &Proposal, votes: &[Vote]) -> ProposalStatus;
}

impl<F: Fn(&Proposal, &[Vote]) -> ProposalStatus> Tally for F {
    fn outcome(&self, proposal: &Proposal, votes: &[Vote]) -> ProposalStatus {
        self(proposal, votes)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EndBlockSummary {
    /// Proposals dropped because their deposit period ran out, in queue order.
    pub expired: Vec<ProposalId>,
    /// Proposals whose voting closed in this block, with their outcome, in queue order.
    pub finalized: Vec<(ProposalId, ProposalStatus)>,
}

impl<S: KvStore, R: Router> Keeper<S, R> {
    /// Runs the end-of-block sweep at `header.time`.
    ///
    /// Deposit periods that ran out are deleted together with their deposits, then every
    /// proposal whose voting period ended is tallied and finalized. Each queue is read to
    /// completion, and its cursor released, before its proposals are written.
    ///
    /// An error may come back after some proposals were already expired or finalized, so
    /// the caller must discard the whole block's writes on failure.
    pub fn end_block(
        &mut self,
        header: &BlockHeader,
        tally: &impl Tally,
    ) -> Result<EndBlockSummary> {
        let mut summary = EndBlockSummary::default();

        let expired = self
            .inactive_queue_iterator(header.time)
            .collect::<Result<Vec<_>>>()?;
        for id in expired {
            self.delete_proposal(id).map_err(|e| match e {
                Error::UnknownProposal(id) => Error::QueuedProposalMissing {
                    queue: QueueKind::Inactive,
                    id,
                },
                e => e,
            })?;
            info!("[GOV] deposit period of proposal {} expired", id);
            summary.expired.push(id);
        }

        let ended = self
            .active_queue_iterator(header.time)
            .collect::<Result<Vec<_>>>()?;
        for id in ended {
            let mut proposal = self
                .get_proposal(id)?
                .ok_or(Error::QueuedProposalMissing {
                    queue: QueueKind::Active,
                    id,
                })?;
            let votes = self.get_votes(id)?;
            let outcome = tally.outcome(&proposal, &votes);
            self.finalize_proposal(&mut proposal, outcome)?;
            summary.finalized.push((id, outcome));
        }

        if !summary.expired.is_empty() || !summary.finalized.is_empty() {
            info!("[GOV] end of block {}: {:?}", header.height, summary);
        }
        Ok(summary)
    }
}
