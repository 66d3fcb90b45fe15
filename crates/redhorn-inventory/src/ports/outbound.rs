//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the inventory service requires the host application to
//! provide, together with the adapters shipped with this crate.
//!
//! Production deployments back [`ContainerStore`] with the server's
//! database layer; the in-memory and JSON-file adapters below cover tests,
//! development, and light production.

use crate::domain::container::{ContainerKey, SessionId, StoredContainer};
use crate::domain::errors::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

/// Abstract interface for durable container persistence.
///
/// The store is a key-addressed record store: one [`StoredContainer`] per
/// [`ContainerKey`]. The service performs all invariant checking; adapters
/// only move bytes.
#[async_trait]
pub trait ContainerStore: Send + Sync {
    /// Fetch a container record. `None` when the key has never been saved.
    async fn get(&self, key: &ContainerKey) -> Result<Option<StoredContainer>, StoreError>;

    /// Write a container record, replacing any previous value.
    async fn put(&self, key: &ContainerKey, container: &StoredContainer)
        -> Result<(), StoreError>;

    /// Delete a container record. Returns whether a record existed.
    async fn delete(&self, key: &ContainerKey) -> Result<bool, StoreError>;
}

/// Abstract interface for outcome notifications (fire-and-forget).
///
/// Production wires this to the net-event layer; the service never awaits
/// a delivery confirmation and never fails an operation over a lost
/// notification.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, recipient: SessionId, event: &str, payload: serde_json::Value);
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

// Shared handles work anywhere an adapter does; tests rely on this to keep
// a handle on the adapter they hand to the service.
#[async_trait]
impl<T: ContainerStore + ?Sized> ContainerStore for std::sync::Arc<T> {
    async fn get(&self, key: &ContainerKey) -> Result<Option<StoredContainer>, StoreError> {
        (**self).get(key).await
    }

    async fn put(
        &self,
        key: &ContainerKey,
        container: &StoredContainer,
    ) -> Result<(), StoreError> {
        (**self).put(key, container).await
    }

    async fn delete(&self, key: &ContainerKey) -> Result<bool, StoreError> {
        (**self).delete(key).await
    }
}

#[async_trait]
impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    async fn notify(&self, recipient: SessionId, event: &str, payload: serde_json::Value) {
        (**self).notify(recipient, event, payload).await;
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

// =============================================================================
// ADAPTER IMPLEMENTATIONS
// Production: database-backed store in the host server
// Testing/development: in-memory and JSON-file implementations below
// =============================================================================

/// Default time source using system time.
#[derive(Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually advanced time source for unit tests.
///
/// Lets tests step past the cache freshness window without sleeping.
#[derive(Default)]
pub struct ManualTimeSource {
    millis: AtomicU64,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn set_millis(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// In-memory container store for unit tests and development.
#[derive(Default)]
pub struct InMemoryContainerStore {
    data: RwLock<HashMap<ContainerKey, StoredContainer>>,
}

impl InMemoryContainerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted containers (test helper).
    pub fn len(&self) -> usize {
        self.data.read().map(|data| data.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContainerStore for InMemoryContainerStore {
    async fn get(&self, key: &ContainerKey) -> Result<Option<StoredContainer>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::new("store lock poisoned"))?;
        Ok(data.get(key).cloned())
    }

    async fn put(
        &self,
        key: &ContainerKey,
        container: &StoredContainer,
    ) -> Result<(), StoreError> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::new("store lock poisoned"))?;
        data.insert(key.clone(), container.clone());
        Ok(())
    }

    async fn delete(&self, key: &ContainerKey) -> Result<bool, StoreError> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::new("store lock poisoned"))?;
        Ok(data.remove(key).is_some())
    }
}

/// File-backed container store for production without a database.
///
/// Persists the full container map as JSON, written atomically via a temp
/// file and rename. Suitable for development servers and small deployments.
pub struct JsonFileStore {
    data: RwLock<HashMap<String, StoredContainer>>,
    path: std::path::PathBuf,
}

impl JsonFileStore {
    /// Open (or create) a store at the given path.
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let data = Self::load_from_file(&path).unwrap_or_default();

        if data.is_empty() {
            tracing::info!(path = %path.display(), "container store file empty or not found");
        } else {
            tracing::info!(
                path = %path.display(),
                containers = data.len(),
                "loaded container store file"
            );
        }

        Self {
            data: RwLock::new(data),
            path,
        }
    }

    fn load_from_file(path: &std::path::Path) -> Option<HashMap<String, StoredContainer>> {
        let bytes = std::fs::read(path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Persist the map to disk. Callers pass the map under its write guard
    /// so concurrent saves cannot rename an older snapshot over a newer one.
    fn save_locked(&self, data: &HashMap<String, StoredContainer>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| StoreError::new(format!("serialize container map: {e}")))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::new(format!("create store dir: {e}")))?;
        }

        // Write atomically via temp file so a crash mid-write never
        // truncates the live store.
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &bytes)
            .map_err(|e| StoreError::new(format!("write store file: {e}")))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::new(format!("rename store file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl ContainerStore for JsonFileStore {
    async fn get(&self, key: &ContainerKey) -> Result<Option<StoredContainer>, StoreError> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::new("store lock poisoned"))?;
        Ok(data.get(&key.to_string()).cloned())
    }

    async fn put(
        &self,
        key: &ContainerKey,
        container: &StoredContainer,
    ) -> Result<(), StoreError> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::new("store lock poisoned"))?;
        data.insert(key.to_string(), container.clone());
        self.save_locked(&data)
    }

    async fn delete(&self, key: &ContainerKey) -> Result<bool, StoreError> {
        let mut data = self
            .data
            .write()
            .map_err(|_| StoreError::new("store lock poisoned"))?;
        if data.remove(&key.to_string()).is_none() {
            return Ok(false);
        }
        self.save_locked(&data)?;
        Ok(true)
    }
}

/// Notification sink that drops everything. Default for headless use.
#[derive(Default)]
pub struct NullNotificationSink;

#[async_trait]
impl NotificationSink for NullNotificationSink {
    async fn notify(&self, _recipient: SessionId, _event: &str, _payload: serde_json::Value) {}
}

/// Notification sink that records every event for assertions in tests.
#[derive(Default)]
pub struct RecordingNotificationSink {
    events: Mutex<Vec<(SessionId, String, serde_json::Value)>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<(SessionId, String, serde_json::Value)> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    /// Event names recorded so far, without draining.
    pub fn event_names(&self) -> Vec<String> {
        self.events
            .lock()
            .map(|events| events.iter().map(|(_, name, _)| name.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify(&self, recipient: SessionId, event: &str, payload: serde_json::Value) {
        if let Ok(mut events) = self.events.lock() {
            events.push((recipient, event.to_string(), payload));
        }
    }
}
