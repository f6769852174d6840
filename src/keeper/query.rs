use log::debug;

use super::Keeper;
use crate::router::Router;
use crate::store::KvStore;
use crate::{keys, Address, Proposal, ProposalStatus, Result};

/// Page size used when a query asks for a limit of zero.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryProposalsParams {
    /// 1-based; page 0 selects nothing.
    pub page: usize,
    pub limit: usize,
    pub status: Option<ProposalStatus>,
    pub depositor: Option<Address>,
    pub voter: Option<Address>,
}

impl QueryProposalsParams {
    pub fn new(
        page: usize,
        limit: usize,
        status: Option<ProposalStatus>,
        depositor: Option<Address>,
        voter: Option<Address>,
    ) -> Self {
        Self {
            page,
            limit,
            status,
            depositor,
            voter,
        }
    }

    /// Number of matches to skip and the most to return, or `None` for an empty page.
    fn window(&self) -> Option<(usize, usize)> {
        if self.page == 0 {
            return None;
        }
        let limit = if self.limit == 0 {
            DEFAULT_QUERY_LIMIT
        } else {
            self.limit
        };
        let skip = (self.page - 1).checked_mul(limit)?;
        Some((skip, limit))
    }
}

impl<S: KvStore, R: Router> Keeper<S, R> {
    /// Proposals matching every given filter, in ascending id order, paginated.
    ///
    /// This walks the full proposal set, so its cost grows with the number of proposals.
    pub fn get_proposals_filtered(&self, params: &QueryProposalsParams) -> Result<Vec<Proposal>> {
        let (skip, limit) = match params.window() {
            Some(window) => window,
            None => return Ok(vec![]),
        };

        let mut matched = 0;
        let mut page = Vec::with_capacity(limit.min(DEFAULT_QUERY_LIMIT));
        for proposal in self.proposals() {
            let proposal = proposal?;
            if !self.matches_filters(&proposal, params) {
                continue;
            }
            matched += 1;
            if matched <= skip {
                continue;
            }
            page.push(proposal);
            if page.len() == limit {
                break;
            }
        }

        debug!(
            "[GOV] query {:?} matched {} proposals, returning {}",
            params,
            matched,
            page.len()
        );
        Ok(page)
    }

    fn matches_filters(&self, proposal: &Proposal, params: &QueryProposalsParams) -> bool {
        if let Some(status) = params.status {
            if proposal.status != status {
                return false;
            }
        }
        if let Some(depositor) = params.depositor.as_ref() {
            if !self.store.has(&keys::deposit_key(proposal.id, depositor)) {
                return false;
            }
        }
        if let Some(voter) = params.voter.as_ref() {
            if !self.store.has(&keys::vote_key(proposal.id, voter)) {
                return false;
            }
        }
        true
    }
}
