// SPDX-License-Identifier: Apache-2.0

//! TTL-bounded caching of fetched issue lists.
//!
//! The service depends on the [`IssueCache`] trait only, so the storage can
//! be swapped: [`NoopCache`] disables caching, [`MemoryCache`] keeps a
//! size- and time-bounded map in process. The cache holds the raw,
//! page-accumulated issues of a repository, never scored or sorted output.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CacheConfig;
use crate::github::types::RawIssue;

/// Issues of one repository, shared between the cache and in-flight requests.
pub type CachedIssues = Arc<Vec<RawIssue>>;

/// A cached entry with metadata.
///
/// Wraps cached data with the time it was stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data.
    pub data: T,
    /// When the entry was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    /// Check if this entry is still valid based on TTL.
    ///
    /// # Returns
    ///
    /// `true` if the entry is within its TTL, `false` if expired.
    pub fn is_valid(&self, ttl: Duration) -> bool {
        let now = Utc::now();
        now.signed_duration_since(self.cached_at) < ttl
    }
}

/// Cache key for a repository.
///
/// GitHub owner and repository names are case-insensitive, so the key is
/// normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    owner: String,
    repo: String,
}

impl CacheKey {
    /// Creates the key for `owner/repo`.
    #[must_use]
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_lowercase(),
            repo: repo.to_lowercase(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Storage for fetched issue lists.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait IssueCache: Send + Sync {
    /// Returns the cached issues for `key` if present and not expired.
    async fn get(&self, key: &CacheKey) -> Option<CachedIssues>;

    /// Stores the issues for `key`, evicting other entries if needed.
    async fn set(&self, key: CacheKey, issues: CachedIssues);

    /// Removes every expired entry and returns how many were removed.
    async fn evict_expired(&self) -> usize;

    /// Number of entries currently stored (expired ones included).
    async fn len(&self) -> usize;
}

/// A cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl IssueCache for NoopCache {
    async fn get(&self, _key: &CacheKey) -> Option<CachedIssues> {
        None
    }

    async fn set(&self, _key: CacheKey, _issues: CachedIssues) {}

    async fn evict_expired(&self) -> usize {
        0
    }

    async fn len(&self) -> usize {
        0
    }
}

#[derive(Debug)]
struct Slot {
    entry: CacheEntry<CachedIssues>,
    last_access: u64,
}

#[derive(Debug, Default)]
struct Inner {
    slots: HashMap<CacheKey, Slot>,
    clock: u64,
}

impl Inner {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn purge_expired(&mut self, ttl: Duration) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.entry.is_valid(ttl));
        before - self.slots.len()
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_access)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            debug!(key = %key, "Evicting least recently used cache entry");
            self.slots.remove(&key);
        }
    }
}

/// In-memory cache bounded by time-to-live and entry count.
///
/// When full, expired entries are dropped first, then the least recently
/// used one. The lock is never held across an `.await`.
#[derive(Debug)]
pub struct MemoryCache {
    inner: Mutex<Inner>,
    ttl: Duration,
    max_entries: usize,
}

impl MemoryCache {
    /// Creates a cache with the given TTL and capacity (at least one entry).
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    /// Creates a cache from configuration.
    ///
    /// TTLs too large for a [`Duration`] saturate, so such entries never expire.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self::new(ttl, config.max_entries)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl IssueCache for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<CachedIssues> {
        let mut inner = self.lock();
        let now = inner.tick();

        let slot = inner.slots.get_mut(key)?;
        if slot.entry.is_valid(self.ttl) {
            slot.last_access = now;
            return Some(Arc::clone(&slot.entry.data));
        }

        debug!(key = %key, "Cache entry expired");
        inner.slots.remove(key);
        None
    }

    async fn set(&self, key: CacheKey, issues: CachedIssues) {
        let mut inner = self.lock();
        let now = inner.tick();

        if !inner.slots.contains_key(&key) && inner.slots.len() >= self.max_entries {
            inner.purge_expired(self.ttl);
            if inner.slots.len() >= self.max_entries {
                inner.evict_lru();
            }
        }

        inner.slots.insert(
            key,
            Slot {
                entry: CacheEntry::new(issues),
                last_access: now,
            },
        );
    }

    async fn evict_expired(&self) -> usize {
        self.lock().purge_expired(self.ttl)
    }

    async fn len(&self) -> usize {
        self.lock().slots.len()
    }
}
