use std::collections::BTreeMap;
use std::ops::Bound;

/// A `(key, value)` pair borrowed from the store.
pub type KvPair<'a> = (&'a [u8], &'a [u8]);

/// An ordered key-value store.
///
/// Iteration is in ascending byte-lexicographic key order, which every replica observes identically.
/// Commit and rollback of a batch belong to the implementor, the keeper only reads and writes.
pub trait KvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    fn delete(&mut self, key: &[u8]);

    /// Iterates over `start <= key < end`; `end = None` means unbounded.
    fn range<'a>(
        &'a self,
        start: &[u8],
        end: Option<&[u8]>,
    ) -> Box<dyn Iterator<Item = KvPair<'a>> + 'a>;

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    fn prefix<'a>(&'a self, prefix: &[u8]) -> Box<dyn Iterator<Item = KvPair<'a>> + 'a> {
        let end = prefix_end(prefix);
        self.range(prefix, end.as_deref())
    }
}

/// Returns the smallest key greater than every key starting with `prefix`,
/// or `None` if no such key exists (prefix is empty or all `0xff`).
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

/// In-memory store, used by tests and by hosts that keep governance state in memory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }

    fn range<'a>(
        &'a self,
        start: &[u8],
        end: Option<&[u8]>,
    ) -> Box<dyn Iterator<Item = KvPair<'a>> + 'a> {
        let upper = match end {
            Some(end) => Bound::Excluded(end.to_vec()),
            None => Bound::Unbounded,
        };
        if matches!(&upper, Bound::Excluded(end) if end.as_slice() <= start) {
            return Box::new(std::iter::empty());
        }
        Box::new(
            self.entries
                .range((Bound::Included(start.to_vec()), upper))
                .map(|(k, v)| (k.as_slice(), v.as_slice())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_end() {
        assert_eq!(prefix_end(&[0x01, 0x02]), Some(vec![0x01, 0x03]));
        assert_eq!(prefix_end(&[0x01, 0xff]), Some(vec![0x02]));
        assert_eq!(prefix_end(&[0xff, 0xff]), None);
        assert_eq!(prefix_end(&[]), None);
    }

    #[test]
    fn test_range_is_ordered_and_bounded() {
        let mut store = MemStore::new();
        for k in [vec![2u8], vec![1], vec![1, 0], vec![3]] {
            store.set(k.clone(), k);
        }

        let keys: Vec<_> = store
            .range(&[1], Some(&[3]))
            .map(|(k, _)| k.to_vec())
            .collect();
        assert_eq!(keys, vec![vec![1], vec![1, 0], vec![2]]);

        assert_eq!(store.range(&[3], Some(&[1])).count(), 0);
        assert_eq!(store.prefix(&[1]).count(), 2);
    }

    #[test]
    fn test_delete() {
        let mut store = MemStore::new();
        store.set(vec![1], vec![1]);
        assert!(store.has(&[1]));
        store.delete(&[1]);
        assert!(!store.has(&[1]));
        assert!(store.is_empty());
    }
}
