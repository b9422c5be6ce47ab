//! Bounded in-memory cache of search results
//!
//! Entries map a `(normalized query, zip filter, limit)` key to the ordered
//! ids of the matching politicians. The dataset never changes while the
//! process runs, so entries never go stale and are never invalidated.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Default maximum number of cached searches
pub const DEFAULT_CAPACITY: usize = 256;

/// What to do when a new key arrives and the cache is full
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Keep existing entries and silently skip the new one
    #[default]
    RejectWhenFull,
    /// Drop the oldest-inserted entry to make room
    EvictOldest,
}

/// Composite cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: String,
    pub zip_filter: Option<String>,
    pub limit: usize,
}

impl CacheKey {
    pub fn new(normalized_query: &str, zip_filter: Option<&str>, limit: usize) -> Self {
        Self {
            query: normalized_query.to_string(),
            zip_filter: zip_filter.map(str::to_string),
            limit,
        }
    }
}

/// Snapshot of cache usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub policy: CachePolicy,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, Arc<[u32]>>,
    // insertion order, oldest first
    order: VecDeque<CacheKey>,
}

#[derive(Debug)]
pub struct ResultCache {
    state: Mutex<CacheState>,
    capacity: usize,
    policy: CachePolicy,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, CachePolicy::default())
    }
}

impl ResultCache {
    pub fn new(capacity: usize, policy: CachePolicy) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity,
            policy,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    // Entries are immutable once written, so a poisoned lock still guards
    // consistent data.
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<[u32]>> {
        let found = self.lock().entries.get(key).cloned();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Store a result. Returns whether the entry is now present.
    ///
    /// An existing entry for the same key is left untouched.
    pub fn insert(&self, key: CacheKey, ids: Vec<u32>) -> bool {
        let mut state = self.lock();

        if state.entries.contains_key(&key) {
            return true;
        }

        if state.entries.len() >= self.capacity {
            match self.policy {
                CachePolicy::RejectWhenFull => {
                    debug!("Result cache full ({} entries), not caching {:?}", self.capacity, key.query);
                    return false;
                }
                CachePolicy::EvictOldest => {
                    if self.capacity == 0 {
                        return false;
                    }
                    while state.entries.len() >= self.capacity {
                        let Some(oldest) = state.order.pop_front() else {
                            break;
                        };
                        state.entries.remove(&oldest);
                        debug!("Evicted cached search {:?}", oldest.query);
                    }
                }
            }
        }

        state.order.push_back(key.clone());
        state.entries.insert(key, ids.into());
        true
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity(),
            policy: self.policy,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
