//! The governance keeper: the only writer of proposals, queues, deposits and votes.
//!
//! Every single-proposal operation checks its preconditions before touching the store,
//! so its errors never leave a half-applied transition behind. `end_block` spans many
//! proposals and may fail after earlier ones were written; like any fatal error (see
//! `Error::is_fatal`) that means the surrounding batch must be rolled back.

use log::info;
use serde::{de::DeserializeOwned, Serialize};

use crate::params::{KeeperConfig, Params};
use crate::router::Router;
use crate::store::KvStore;
use crate::{keys, Address, Error, Result};

mod deposit;
mod end_block;
mod proposal;
mod query;
mod vote;

pub use end_block::{EndBlockSummary, Tally};
pub use query::{QueryProposalsParams, DEFAULT_QUERY_LIMIT};

pub const DEFAULT_STARTING_PROPOSAL_ID: u64 = 1;

#[derive(Debug)]
pub struct Keeper<S: KvStore, R: Router> {
    store: S,
    router: R,
    config: KeeperConfig,
}

impl<S: KvStore, R: Router> Keeper<S, R> {
    /// Opens a keeper over `store`. A store without a proposal id counter starts
    /// numbering at `DEFAULT_STARTING_PROPOSAL_ID`; an existing counter is kept.
    pub fn new(mut store: S, router: R, config: KeeperConfig) -> Result<Self> {
        config.params.validate()?;

        let id_key = keys::proposal_id_key();
        if !store.has(&id_key) {
            info!(
                "[GOV] initializing proposal ids at {}",
                DEFAULT_STARTING_PROPOSAL_ID
            );
            store.set(
                id_key,
                keys::proposal_id_bytes(DEFAULT_STARTING_PROPOSAL_ID).to_vec(),
            );
        }

        Ok(Self {
            store,
            router,
            config,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    pub fn params(&self) -> &Params {
        &self.config.params
    }

    pub fn governance_account(&self) -> Address {
        self.config.governance_account
    }

    fn get_record<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>> {
        match self.store.get(key) {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn set_record<T: Serialize>(&mut self, key: Vec<u8>, record: &T) -> Result<()> {
        let bytes = bincode::serialize(record)?;
        self.store.set(key, bytes);
        Ok(())
    }

    /// Decodes every record stored under `prefix`, in key order.
    fn records_with_prefix<'a, T: DeserializeOwned + 'a>(
        &'a self,
        prefix: &[u8],
    ) -> impl Iterator<Item = Result<T>> + 'a {
        self.store
            .prefix(prefix)
            .map(|(_, bytes)| bincode::deserialize::<T>(bytes).map_err(Error::from))
    }

    /// Deletes every key under `prefix`, returning how many were removed.
    fn delete_prefix(&mut self, prefix: &[u8]) -> usize {
        let doomed: Vec<Vec<u8>> = self.store.prefix(prefix).map(|(k, _)| k.to_vec()).collect();
        for key in doomed.iter() {
            self.store.delete(key);
        }
        doomed.len()
    }
}
