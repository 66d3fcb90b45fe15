//! # Per-Container Lock Table
//!
//! Each container key is an independent unit of mutual exclusion: every
//! read-modify-write of a container holds its key's lock for the whole
//! read-compute-write sequence. Operations on different keys never block
//! each other.
//!
//! Two-container moves acquire both locks in the global `ContainerKey`
//! order (kind, then id), which makes the lock graph acyclic. Acquisition
//! is bounded; expiry surfaces as a transient `LockTimeout`.

use crate::domain::container::ContainerKey;
use crate::domain::errors::InventoryError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

pub(crate) struct LockTable {
    locks: StdMutex<HashMap<ContainerKey, Arc<AsyncMutex<()>>>>,
    timeout: Duration,
}

impl LockTable {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: StdMutex::new(HashMap::new()),
            timeout,
        }
    }

    /// Lazily created lock handle for `key`.
    ///
    /// Also sweeps handles nobody holds, so churning keys (ground drops)
    /// cannot grow the table without bound. Guards and pending acquirers
    /// keep their handle's `Arc` alive and are never swept.
    fn handle(&self, key: &ContainerKey) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(
            locks
                .entry(key.clone())
                .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
        )
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Acquire the lock for one container key, bounded by the configured
    /// timeout.
    pub async fn acquire(&self, key: &ContainerKey) -> Result<OwnedMutexGuard<()>, InventoryError> {
        let handle = self.handle(key);
        tokio::time::timeout(self.timeout, handle.lock_owned())
            .await
            .map_err(|_| InventoryError::LockTimeout {
                key: key.to_string(),
            })
    }

    /// Acquire the locks for two distinct container keys in the global key
    /// order.
    pub async fn acquire_pair(
        &self,
        a: &ContainerKey,
        b: &ContainerKey,
    ) -> Result<(OwnedMutexGuard<()>, OwnedMutexGuard<()>), InventoryError> {
        debug_assert_ne!(a, b, "acquire_pair requires distinct keys");
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let first_guard = self.acquire(first).await?;
        let second_guard = self.acquire(second).await?;
        Ok((first_guard, second_guard))
    }
}
