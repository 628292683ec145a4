//! Snapshot diffing.
//!
//! A [`Snapshot`] is a point-in-time listing of one resource collection keyed by
//! a stable identity. [`diff`] compares two snapshots and classifies every key
//! whose presence or state differs. The function holds no state between calls
//! and always yields records in ascending key order, so identical inputs give
//! identical output.

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Comparable state of one resource within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry<T> {
    /// Lifecycle/status value compared across ticks.
    pub state: String,
    /// Full record as listed, kept for event payloads.
    pub item: T,
}

/// Keyed listing of a resource collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<K, T> {
    entries: BTreeMap<K, SnapshotEntry<T>>,
}

impl<K: Ord, T> Snapshot<K, T> {
    /// Create an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a snapshot from a raw listing.
    ///
    /// When the listing repeats a key, the last occurrence wins.
    pub fn from_items<I, FK, FS>(items: I, key_of: FK, state_of: FS) -> Self
    where
        I: IntoIterator<Item = T>,
        FK: Fn(&T) -> K,
        FS: Fn(&T) -> String,
    {
        let mut snapshot = Self::new();
        for item in items {
            let key = key_of(&item);
            let state = state_of(&item);
            snapshot.insert(key, state, item);
        }
        snapshot
    }

    /// Insert or replace the entry for `key`, returning the replaced entry.
    pub fn insert(&mut self, key: K, state: impl Into<String>, item: T) -> Option<SnapshotEntry<T>> {
        self.entries.insert(
            key,
            SnapshotEntry {
                state: state.into(),
                item,
            },
        )
    }

    /// Look up the entry for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&SnapshotEntry<T>> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of resources in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, SnapshotEntry<T>> {
        self.entries.iter()
    }
}

impl<K: Ord, T> Default for Snapshot<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, T> FromIterator<(K, String, T)> for Snapshot<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, String, T)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (key, state, item) in iter {
            snapshot.insert(key, state, item);
        }
        snapshot
    }
}

/// Classification of a key between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Present now, absent before.
    New,
    /// Present in both with a different state.
    Changed,
    /// Present before, absent now.
    Removed,
}

/// One classified difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<K, T> {
    /// Stable identity of the resource.
    pub key: K,
    /// How the key changed.
    pub kind: ChangeKind,
    /// Entry from the previous snapshot (`Changed` and `Removed`).
    pub previous: Option<SnapshotEntry<T>>,
    /// Entry from the current snapshot (`New` and `Changed`).
    pub current: Option<SnapshotEntry<T>>,
}

impl<K, T> Change<K, T> {
    /// State before the change, if the key existed.
    pub fn previous_state(&self) -> Option<&str> {
        self.previous.as_ref().map(|e| e.state.as_str())
    }

    /// State after the change, if the key still exists.
    pub fn new_state(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.state.as_str())
    }

    /// Most recent record for the key: the current one, else the last seen.
    pub fn latest(&self) -> Option<&T> {
        self.current
            .as_ref()
            .or(self.previous.as_ref())
            .map(|e| &e.item)
    }
}

/// Compare two snapshots and return one record per differing key, in key order.
///
/// Keys present in both snapshots with equal state produce no record, so
/// `diff(s, s)` is always empty.
pub fn diff<K, T>(previous: &Snapshot<K, T>, current: &Snapshot<K, T>) -> Vec<Change<K, T>>
where
    K: Ord + Clone,
    T: Clone,
{
    let mut prev = previous.iter().peekable();
    let mut curr = current.iter().peekable();
    let mut changes = Vec::new();

    loop {
        let order = match (prev.peek(), curr.peek()) {
            (None, None) => break,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((pk, _)), Some((ck, _))) => pk.cmp(ck),
        };

        match order {
            Ordering::Less => {
                if let Some((key, entry)) = prev.next() {
                    changes.push(Change {
                        key: key.clone(),
                        kind: ChangeKind::Removed,
                        previous: Some(entry.clone()),
                        current: None,
                    });
                }
            }
            Ordering::Greater => {
                if let Some((key, entry)) = curr.next() {
                    changes.push(Change {
                        key: key.clone(),
                        kind: ChangeKind::New,
                        previous: None,
                        current: Some(entry.clone()),
                    });
                }
            }
            Ordering::Equal => {
                if let (Some((key, before)), Some((_, after))) = (prev.next(), curr.next()) {
                    if before.state != after.state {
                        changes.push(Change {
                            key: key.clone(),
                            kind: ChangeKind::Changed,
                            previous: Some(before.clone()),
                            current: Some(after.clone()),
                        });
                    }
                }
            }
        }
    }

    changes
}
