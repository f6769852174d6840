//! Governance proposals for a replicated state machine.
//!
//! Proposals are submitted into a deposit period, move to a voting period once enough
//! has been deposited, and are finalized when voting closes. Two time-ordered queues
//! find the proposals whose period has ended without scanning every proposal, and
//! filtered queries page through proposals by status, depositor and voter.
//!
//! All state lives in a caller supplied ordered key-value store and every key is a
//! fixed-width big-endian encoding, so replicas applying the same batches end up with
//! byte-identical stores.

pub mod address;
pub mod deposit;
pub mod error;
pub mod keeper;
pub mod keys;
pub mod msg;
pub mod params;
pub mod proposal;
pub mod queue;
pub mod router;
pub mod store;
pub mod timestamp;
pub mod vote;

pub use crate::address::{Address, ADDRESS_LEN};
pub use crate::deposit::Deposit;
pub use crate::error::{Error, Result};
pub use crate::keeper::{
    EndBlockSummary, Keeper, QueryProposalsParams, Tally, DEFAULT_QUERY_LIMIT,
    DEFAULT_STARTING_PROPOSAL_ID,
};
pub use crate::msg::{Action, Msg, MsgCustom, MsgDeposit, MsgSend, MsgVote};
pub use crate::params::{KeeperConfig, Params};
pub use crate::proposal::{Content, Proposal, ProposalId, ProposalStatus};
pub use crate::queue::{QueueIter, QueueKind, TimeQueue};
pub use crate::router::{RouteTable, Router};
pub use crate::store::{KvStore, MemStore};
pub use crate::timestamp::{BlockHeader, Timestamp};
pub use crate::vote::{Vote, VoteOption, Weight, WeightedVoteOption};
