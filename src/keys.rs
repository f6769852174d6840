//! Store key layout.
//!
//! ```text
//! 0x00 | id                  -> Proposal
//! 0x01 | end_time | id       -> id        (active queue)
//! 0x02 | end_time | id       -> id        (inactive queue)
//! 0x03                       -> next proposal id
//! 0x04 | id                  -> end_time  (active queue membership)
//! 0x05 | id                  -> end_time  (inactive queue membership)
//! 0x10 | id | depositor      -> Deposit
//! 0x20 | id | voter          -> Vote
//! ```
//!
//! Every integer is fixed-width big-endian so byte order equals numeric order.

use crate::address::{Address, ADDRESS_LEN};
use crate::timestamp::{Timestamp, TIMESTAMP_LEN};
use crate::{Error, ProposalId, Result};

pub const PROPOSALS_PREFIX: u8 = 0x00;
pub const ACTIVE_QUEUE_PREFIX: u8 = 0x01;
pub const INACTIVE_QUEUE_PREFIX: u8 = 0x02;
pub const PROPOSAL_ID_KEY: u8 = 0x03;
pub const ACTIVE_QUEUE_INDEX_PREFIX: u8 = 0x04;
pub const INACTIVE_QUEUE_INDEX_PREFIX: u8 = 0x05;
pub const DEPOSITS_PREFIX: u8 = 0x10;
pub const VOTES_PREFIX: u8 = 0x20;

pub const PROPOSAL_ID_LEN: usize = 8;

pub fn proposal_id_bytes(id: ProposalId) -> [u8; PROPOSAL_ID_LEN] {
    id.to_be_bytes()
}

pub fn proposal_id_from_bytes(bytes: &[u8]) -> Result<ProposalId> {
    let bytes: [u8; PROPOSAL_ID_LEN] = bytes
        .try_into()
        .map_err(|_| Error::MalformedKey(bytes.to_vec()))?;
    Ok(ProposalId::from_be_bytes(bytes))
}

pub fn timestamp_from_bytes(bytes: &[u8]) -> Result<Timestamp> {
    let bytes: [u8; TIMESTAMP_LEN] = bytes
        .try_into()
        .map_err(|_| Error::MalformedKey(bytes.to_vec()))?;
    Ok(Timestamp::from_be_bytes(bytes))
}

pub fn proposal_key(id: ProposalId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + PROPOSAL_ID_LEN);
    key.push(PROPOSALS_PREFIX);
    key.extend_from_slice(&proposal_id_bytes(id));
    key
}

pub fn proposal_id_key() -> Vec<u8> {
    vec![PROPOSAL_ID_KEY]
}

/// `prefix | end_time`, the bound used to scan a queue up to a point in time.
pub fn queue_time_key(prefix: u8, end_time: Timestamp) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + TIMESTAMP_LEN + PROPOSAL_ID_LEN);
    key.push(prefix);
    key.extend_from_slice(&end_time.to_be_bytes());
    key
}

pub fn queue_entry_key(prefix: u8, end_time: Timestamp, id: ProposalId) -> Vec<u8> {
    let mut key = queue_time_key(prefix, end_time);
    key.extend_from_slice(&proposal_id_bytes(id));
    key
}

/// Splits a queue entry key back into `(end_time, id)`.
pub fn split_queue_entry_key(key: &[u8]) -> Result<(Timestamp, ProposalId)> {
    if key.len() != 1 + TIMESTAMP_LEN + PROPOSAL_ID_LEN {
        return Err(Error::MalformedKey(key.to_vec()));
    }
    let end_time = timestamp_from_bytes(&key[1..1 + TIMESTAMP_LEN])?;
    let id = proposal_id_from_bytes(&key[1 + TIMESTAMP_LEN..])?;
    Ok((end_time, id))
}

pub fn queue_index_key(prefix: u8, id: ProposalId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + PROPOSAL_ID_LEN);
    key.push(prefix);
    key.extend_from_slice(&proposal_id_bytes(id));
    key
}

fn participant_prefix(prefix: u8, id: ProposalId) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + PROPOSAL_ID_LEN + ADDRESS_LEN);
    key.push(prefix);
    key.extend_from_slice(&proposal_id_bytes(id));
    key
}

pub fn deposits_key(id: ProposalId) -> Vec<u8> {
    participant_prefix(DEPOSITS_PREFIX, id)
}

pub fn deposit_key(id: ProposalId, depositor: &Address) -> Vec<u8> {
    let mut key = deposits_key(id);
    key.extend_from_slice(depositor.as_bytes());
    key
}

pub fn votes_key(id: ProposalId) -> Vec<u8> {
    participant_prefix(VOTES_PREFIX, id)
}

pub fn vote_key(id: ProposalId, voter: &Address) -> Vec<u8> {
    let mut key = votes_key(id);
    key.extend_from_slice(voter.as_bytes());
    key
}
