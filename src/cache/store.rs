//! Cache Store Module
//!
//! URL-keyed asset cache with time-based expiry.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::CacheEntry;

// == Lookup ==
/// Outcome of a read against the store.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Entry present and younger than the TTL
    Hit(CacheEntry),
    /// Entry present but expired. It is still in the store.
    Stale,
    /// No entry for the key
    Miss,
}

// == Cache Store ==
/// In-memory asset cache keyed by the exact target URL string.
///
/// Reads never delete. A caller that observes [`Lookup::Stale`] must call
/// [`CacheStore::delete`] before acting on the miss; expired entries are
/// otherwise left for [`CacheStore::sweep`].
#[derive(Debug)]
pub struct CacheStore {
    /// URL to asset storage
    entries: HashMap<String, CacheEntry>,
    /// Maximum age before an entry is expired
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// The TTL this store applies on reads.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Lookup ==
    /// Classifies `key` as hit, stale or miss at time `now` (Unix ms).
    pub fn lookup_at(&self, key: &str, now: u64) -> Lookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now, self.ttl) => Lookup::Stale,
            Some(entry) => Lookup::Hit(entry.clone()),
            None => Lookup::Miss,
        }
    }

    /// Classifies `key` against the current time.
    pub fn lookup(&self, key: &str) -> Lookup {
        self.lookup_at(key, current_timestamp_ms())
    }

    // == Get ==
    /// Returns the entry if present and unexpired.
    ///
    /// Expired entries read as absent but are not removed.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        match self.lookup(key) {
            Lookup::Hit(entry) => Some(entry),
            Lookup::Stale | Lookup::Miss => None,
        }
    }

    // == Put ==
    /// Stores an entry, replacing any previous one for the key.
    pub fn put(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    // == Delete ==
    /// Removes an entry. Returns whether one was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes the entry only if it is still expired at `now`.
    ///
    /// Callers holding a [`Lookup::Stale`] from an earlier read use this so a
    /// fresh entry written in between is kept. Returns whether one was removed.
    pub fn delete_if_stale(&mut self, key: &str, now: u64) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired_at(now, self.ttl) => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    // == Sweep ==
    /// Removes every entry strictly older than `ttl` at time `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now: u64, ttl: Duration) -> usize {
        let before = self.entries.len();

        self.entries.retain(|key, entry| {
            let keep = !entry.is_older_than(now, ttl);
            if !keep {
                debug!("Removed expired cache entry: {}", key);
            }
            keep
        });

        before - self.entries.len()
    }

    /// Sweeps with the store's own TTL at the current time.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep(current_timestamp_ms(), self.ttl)
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
