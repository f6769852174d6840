use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::keys::{
    self, ACTIVE_QUEUE_INDEX_PREFIX, ACTIVE_QUEUE_PREFIX, INACTIVE_QUEUE_INDEX_PREFIX,
    INACTIVE_QUEUE_PREFIX,
};
use crate::store::{prefix_end, KvPair, KvStore};
use crate::timestamp::Timestamp;
use crate::{Error, ProposalId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QueueKind {
    /// Proposals in their voting period, keyed by voting end time.
    Active,
    /// Proposals in their deposit period, keyed by deposit end time.
    Inactive,
}

/// A secondary index over proposals ordered by `(end_time, id)`.
///
/// Next to each entry the queue keeps an `id -> end_time` membership record so that a
/// second entry for the same proposal is caught even when it carries a different time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeQueue {
    kind: QueueKind,
}

impl TimeQueue {
    pub const ACTIVE: TimeQueue = TimeQueue::new(QueueKind::Active);
    pub const INACTIVE: TimeQueue = TimeQueue::new(QueueKind::Inactive);

    pub const fn new(kind: QueueKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    fn entries_prefix(&self) -> u8 {
        match self.kind {
            QueueKind::Active => ACTIVE_QUEUE_PREFIX,
            QueueKind::Inactive => INACTIVE_QUEUE_PREFIX,
        }
    }

    fn index_prefix(&self) -> u8 {
        match self.kind {
            QueueKind::Active => ACTIVE_QUEUE_INDEX_PREFIX,
            QueueKind::Inactive => INACTIVE_QUEUE_INDEX_PREFIX,
        }
    }

    pub fn insert<S: KvStore + ?Sized>(
        &self,
        store: &mut S,
        end_time: Timestamp,
        id: ProposalId,
    ) -> Result<()> {
        if let Some(existing) = self.entry(store, id)? {
            warn!(
                "[GOV-QUEUE] {:?} already holds proposal {} at {:?}",
                self.kind, id, existing
            );
            return Err(Error::DuplicateQueueEntry {
                queue: self.kind,
                id,
            });
        }

        store.set(
            keys::queue_entry_key(self.entries_prefix(), end_time, id),
            keys::proposal_id_bytes(id).to_vec(),
        );
        store.set(
            keys::queue_index_key(self.index_prefix(), id),
            end_time.to_be_bytes().to_vec(),
        );
        debug!("[GOV-QUEUE] {:?} += ({:?}, {})", self.kind, end_time, id);
        Ok(())
    }

    pub fn remove<S: KvStore + ?Sized>(
        &self,
        store: &mut S,
        end_time: Timestamp,
        id: ProposalId,
    ) -> Result<()> {
        self.ensure_contains(store, end_time, id)?;
        store.delete(&keys::queue_entry_key(self.entries_prefix(), end_time, id));
        store.delete(&keys::queue_index_key(self.index_prefix(), id));
        debug!("[GOV-QUEUE] {:?} -= ({:?}, {})", self.kind, end_time, id);
        Ok(())
    }

    /// Errors unless exactly the entry `(end_time, id)` is queued.
    pub fn ensure_contains<S: KvStore + ?Sized>(
        &self,
        store: &S,
        end_time: Timestamp,
        id: ProposalId,
    ) -> Result<()> {
        let entry_key = keys::queue_entry_key(self.entries_prefix(), end_time, id);
        if self.entry(store, id)? == Some(end_time) && store.has(&entry_key) {
            Ok(())
        } else {
            warn!(
                "[GOV-QUEUE] {:?} has no entry ({:?}, {})",
                self.kind, end_time, id
            );
            Err(Error::MissingQueueEntry {
                queue: self.kind,
                id,
                end_time,
            })
        }
    }

    /// The end time under which `id` is queued, if it is queued at all.
    pub fn entry<S: KvStore + ?Sized>(&self, store: &S, id: ProposalId) -> Result<Option<Timestamp>> {
        store
            .get(&keys::queue_index_key(self.index_prefix(), id))
            .map(|bytes| keys::timestamp_from_bytes(&bytes))
            .transpose()
    }

    /// Opens a cursor over every proposal whose end time is `<= upto`,
    /// ascending by `(end_time, id)`. The cursor is released when the iterator is dropped.
    pub fn iter<'a, S: KvStore + ?Sized>(&self, store: &'a S, upto: Timestamp) -> QueueIter<'a> {
        let start = [self.entries_prefix()];
        let end = prefix_end(&keys::queue_time_key(self.entries_prefix(), upto));
        debug!("[GOV-QUEUE] opening {:?} cursor up to {:?}", self.kind, upto);
        QueueIter {
            kind: self.kind,
            inner: store.range(&start, end.as_deref()),
            yielded: 0,
        }
    }
}

/// Cursor over a `TimeQueue`, see `TimeQueue::iter`.
pub struct QueueIter<'a> {
    kind: QueueKind,
    inner: Box<dyn Iterator<Item = KvPair<'a>> + 'a>,
    yielded: usize,
}

impl<'a> QueueIter<'a> {
    /// Like `Iterator::next` but also yields the end time of the entry.
    pub fn next_entry(&mut self) -> Option<Result<(Timestamp, ProposalId)>> {
        let (key, _) = self.inner.next()?;
        self.yielded += 1;
        Some(keys::split_queue_entry_key(key))
    }
}

impl<'a> Iterator for QueueIter<'a> {
    type Item = Result<ProposalId>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|entry| entry.map(|(_, id)| id))
    }
}

impl<'a> Drop for QueueIter<'a> {
    fn drop(&mut self) {
        debug!(
            "[GOV-QUEUE] released {:?} cursor after {} entries",
            self.kind, self.yielded
        );
    }
}
