//! # Inventory Cache
//!
//! Per-key snapshots of container records with a freshness deadline.
//!
//! The cache is write-through: a save hits the durable store first and only
//! then refreshes the entry, so a crash after a save never loses data and a
//! load never observes anything older than the latest save. Freshness is
//! per key; there is no global invalidation.

use crate::domain::container::{ContainerKey, StoredContainer};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

struct CacheEntry {
    container: StoredContainer,
    refreshed_at: u64,
}

pub(crate) struct InventoryCache {
    entries: Mutex<HashMap<ContainerKey, CacheEntry>>,
    freshness_millis: u64,
}

impl InventoryCache {
    pub fn new(freshness: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            freshness_millis: freshness.as_millis() as u64,
        }
    }

    /// Snapshot for `key` if the entry is younger than the freshness
    /// window. Returns a clone; the cache never hands out references.
    pub fn fresh(&self, key: &ContainerKey, now_millis: u64) -> Option<StoredContainer> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;
        if now_millis.saturating_sub(entry.refreshed_at) < self.freshness_millis {
            Some(entry.container.clone())
        } else {
            None
        }
    }

    /// Install or refresh the entry for `key`.
    ///
    /// Entries past the freshness window can never be returned again, so
    /// they are pruned here; the cache stays bounded by the set of keys
    /// touched within one window.
    pub fn insert(&self, key: &ContainerKey, container: StoredContainer, now_millis: u64) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| {
            now_millis.saturating_sub(entry.refreshed_at) < self.freshness_millis
        });
        entries.insert(
            key.clone(),
            CacheEntry {
                container,
                refreshed_at: now_millis,
            },
        );
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop the entry for `key` (container deleted).
    pub fn evict(&self, key: &ContainerKey) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }
}
