use thiserror::Error;

use crate::{ProposalId, ProposalStatus, QueueKind, Timestamp};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Proposal message has an invalid signer: {0}")]
    InvalidSigner(String),
    #[error("Proposal message route `{route}` has no registered handler")]
    UnroutableProposalMsg { route: String },
    #[error("Invalid proposal content: {0}")]
    InvalidProposalContent(String),
    #[error("Invalid proposal message: {0}")]
    InvalidProposalMsg(String),
    #[error("Unknown proposal {0}")]
    UnknownProposal(ProposalId),
    #[error("Proposal {id} is not accepting this operation while in {status:?}")]
    InactiveProposal {
        id: ProposalId,
        status: ProposalStatus,
    },
    #[error("Invalid vote: {0}")]
    InvalidVote(String),
    #[error("Deposit amount must be positive")]
    InvalidDepositAmount,
    #[error("Invalid governance params: {0}")]
    InvalidParams(String),

    // Everything below is an invariant violation. The batch driver must abort
    // the batch on any of these, see `Error::is_fatal`.
    #[error("Proposal {id} already has an entry in the {queue:?} queue")]
    DuplicateQueueEntry { queue: QueueKind, id: ProposalId },
    #[error("Proposal {id} has no entry at {end_time:?} in the {queue:?} queue")]
    MissingQueueEntry {
        queue: QueueKind,
        id: ProposalId,
        end_time: Timestamp,
    },
    #[error("Proposal {id} can not move from {from:?} to {to:?}")]
    InvalidStatusTransition {
        id: ProposalId,
        from: ProposalStatus,
        to: ProposalStatus,
    },
    #[error("Proposal {0} is in its voting period without a voting window")]
    MissingVotingWindow(ProposalId),
    #[error("Proposal {id} is queued in the {queue:?} queue but has no record")]
    QueuedProposalMissing { queue: QueueKind, id: ProposalId },
    #[error("The proposal id counter was never initialized")]
    ProposalIdNotSet,
    #[error("The proposal id counter is exhausted")]
    ProposalIdOverflow,
    #[error("Failed to encode with bincode")]
    Encoding(#[from] bincode::Error),
    #[error("Malformed store key {}", hex::encode(.0))]
    MalformedKey(Vec<u8>),
}

impl Error {
    /// Fatal errors signal a corrupted store or a misbehaving caller, never bad user input.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::DuplicateQueueEntry { .. }
                | Error::MissingQueueEntry { .. }
                | Error::InvalidStatusTransition { .. }
                | Error::MissingVotingWindow(_)
                | Error::QueuedProposalMissing { .. }
                | Error::ProposalIdNotSet
                | Error::ProposalIdOverflow
                | Error::Encoding(_)
                | Error::MalformedKey(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
