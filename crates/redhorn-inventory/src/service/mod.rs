//! # Inventory Service
//!
//! The application service implementing the inventory API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements [`InventoryApi`] for session- and script-facing operations
//! 2. Serializes all access per container key through a lazily-built lock
//!    table (two-key moves lock in global key order)
//! 3. Mediates every read/write through the write-through cache
//! 4. Uses dependency injection for store, notifications, and time
//!
//! Every mutation follows the same shape: acquire the key lock(s), load a
//! working copy of the snapshot, run the pure domain algorithm on it, and
//! persist only on success. A domain rejection therefore never leaves a
//! half-applied container behind.

mod cache;
mod locks;
mod session;

use crate::domain::catalog::{ItemCatalog, ItemDefinition};
use crate::domain::config::{InventoryConfig, UsePolicy};
use crate::domain::container::{
    validate_items, ContainerKey, ItemMetadata, SessionId, StoredContainer,
};
use crate::domain::errors::InventoryError;
use crate::domain::transfer::{self, MoveOutcome, MoveSpec};
use crate::ports::inbound::{
    ContainerView, InventoryApi, MoveReceipt, MoveRequest, OpenInventory, UseReceipt,
};
use crate::ports::outbound::{
    ContainerStore, InMemoryContainerStore, NotificationSink, NullNotificationSink,
    SystemTimeSource, TimeSource,
};
use async_trait::async_trait;
use cache::InventoryCache;
use locks::LockTable;
use serde_json::json;
use session::SessionRegistry;
use tracing::{debug, error, info, warn};

/// Event names emitted through the notification sink.
pub mod events {
    pub const OPEN: &str = "inventory:open";
    pub const CLOSE: &str = "inventory:close";
    pub const REFRESH: &str = "inventory:refresh";
    pub const ITEM_USED: &str = "inventory:itemUsed";
    pub const ERROR: &str = "inventory:error";
}

/// Dependencies for [`InventoryService`].
pub struct InventoryDependencies<S, N, T> {
    pub store: S,
    pub notifier: N,
    pub time: T,
}

/// The inventory service.
pub struct InventoryService<S, N, T>
where
    S: ContainerStore,
    N: NotificationSink,
    T: TimeSource,
{
    catalog: ItemCatalog,
    config: InventoryConfig,
    store: S,
    notifier: N,
    time: T,
    cache: InventoryCache,
    locks: LockTable,
    sessions: SessionRegistry,
}

impl<S, N, T> InventoryService<S, N, T>
where
    S: ContainerStore,
    N: NotificationSink,
    T: TimeSource,
{
    /// Create a new inventory service with the given dependencies.
    pub fn new(
        deps: InventoryDependencies<S, N, T>,
        catalog: ItemCatalog,
        config: InventoryConfig,
    ) -> Self {
        info!(
            items = catalog.len(),
            max_weight = config.max_weight,
            slot_capacity = config.slot_capacity,
            "inventory service starting"
        );
        Self {
            cache: InventoryCache::new(config.cache_freshness),
            locks: LockTable::new(config.lock_timeout),
            sessions: SessionRegistry::new(),
            catalog,
            config,
            store: deps.store,
            notifier: deps.notifier,
            time: deps.time,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Load a working copy of the container for `key`.
    ///
    /// Cache hits within the freshness window never touch the store. A
    /// miss fetches from the store, creating a default-empty container for
    /// unseen keys, and refuses records that violate the structural
    /// invariants. Callers must hold the key's lock.
    async fn load_container(&self, key: &ContainerKey) -> Result<StoredContainer, InventoryError> {
        if let Some(container) = self.cache.fresh(key, self.time.now_millis()) {
            return Ok(container);
        }

        let container = match self.store.get(key).await? {
            Some(container) => {
                if let Err(detail) =
                    validate_items(&container.items, self.config.slot_capacity)
                {
                    error!(%key, %detail, "persisted container violates invariants, refusing to load");
                    return Err(InventoryError::CorruptContainer {
                        key: key.to_string(),
                        detail,
                    });
                }
                container
            }
            None => {
                debug!(%key, "container not in store, creating empty");
                StoredContainer::empty(self.config.max_weight)
            }
        };

        self.cache
            .insert(key, container.clone(), self.time.now_millis());
        Ok(container)
    }

    /// Persist a mutated container: durable store first, cache second.
    async fn save_container(
        &self,
        key: &ContainerKey,
        container: StoredContainer,
    ) -> Result<(), InventoryError> {
        self.store.put(key, &container).await?;
        self.cache.insert(key, container, self.time.now_millis());
        Ok(())
    }

    /// Snapshot view of one container, labeled by its kind.
    async fn view(&self, key: &ContainerKey) -> Result<ContainerView, InventoryError> {
        let _guard = self.locks.acquire(key).await?;
        let container = self.load_container(key).await?;
        Ok(ContainerView {
            key: key.clone(),
            label: key.kind.default_label().to_string(),
            slot_capacity: self.config.slot_capacity,
            max_weight: container.max_weight,
            items: container.items,
        })
    }

    async fn try_move(
        &self,
        session: SessionId,
        request: &MoveRequest,
    ) -> Result<MoveOutcome, InventoryError> {
        if !self
            .sessions
            .covers(session, &[&request.from, &request.to])
        {
            return Err(InventoryError::SessionClosed { session });
        }

        let spec = MoveSpec {
            from_slot: request.from_slot,
            to_slot: request.to_slot,
            count: request.count,
        };

        if request.from == request.to {
            let _guard = self.locks.acquire(&request.from).await?;
            let mut container = self.load_container(&request.from).await?;
            let outcome = transfer::move_within(
                &mut container.items,
                &self.catalog,
                spec,
                self.config.slot_capacity,
            )?;
            self.save_container(&request.from, container).await?;
            Ok(outcome)
        } else {
            let _guards = self.locks.acquire_pair(&request.from, &request.to).await?;
            let mut from = self.load_container(&request.from).await?;
            let mut to = self.load_container(&request.to).await?;
            let outcome = transfer::move_across(
                &mut from.items,
                from.max_weight,
                &mut to.items,
                to.max_weight,
                &self.catalog,
                spec,
                self.config.slot_capacity,
            )?;
            self.save_container(&request.from, from).await?;
            self.save_container(&request.to, to).await?;
            Ok(outcome)
        }
    }
}

impl InventoryService<InMemoryContainerStore, NullNotificationSink, SystemTimeSource> {
    /// Create a service with in-memory adapters (tests, tooling, demos).
    pub fn new_in_memory(catalog: ItemCatalog, config: InventoryConfig) -> Self {
        Self::new(
            InventoryDependencies {
                store: InMemoryContainerStore::new(),
                notifier: NullNotificationSink,
                time: SystemTimeSource,
            },
            catalog,
            config,
        )
    }
}

#[async_trait]
impl<S, N, T> InventoryApi for InventoryService<S, N, T>
where
    S: ContainerStore,
    N: NotificationSink,
    T: TimeSource,
{
    async fn open_inventory(
        &self,
        session: SessionId,
        primary: ContainerKey,
        secondary: Option<ContainerKey>,
    ) -> Result<OpenInventory, InventoryError> {
        // A secondary identical to the primary adds nothing to the scope.
        let secondary = secondary.filter(|key| *key != primary);

        let primary_view = self.view(&primary).await?;
        let secondary_view = match &secondary {
            Some(key) => Some(self.view(key).await?),
            None => None,
        };

        let mut scope = vec![primary.clone()];
        scope.extend(secondary.clone());
        self.sessions.open(session, scope);

        debug!(%session, %primary, secondary = ?secondary.as_ref().map(ToString::to_string), "inventory opened");
        self.notifier
            .notify(
                session,
                events::OPEN,
                json!({
                    "primary": primary.to_string(),
                    "secondary": secondary.as_ref().map(ToString::to_string),
                }),
            )
            .await;

        Ok(OpenInventory {
            primary: primary_view,
            secondary: secondary_view,
        })
    }

    async fn close_inventory(&self, session: SessionId) {
        if self.sessions.close(session) {
            debug!(%session, "inventory closed");
            self.notifier
                .notify(session, events::CLOSE, json!({}))
                .await;
        }
    }

    async fn move_item(&self, session: SessionId, request: MoveRequest) -> MoveReceipt {
        match self.try_move(session, &request).await {
            Ok(outcome) => {
                debug!(
                    %session,
                    from = %request.from,
                    to = %request.to,
                    ?outcome,
                    "move applied"
                );
                self.notifier
                    .notify(session, events::REFRESH, json!({}))
                    .await;
                MoveReceipt::ok()
            }
            Err(err) => {
                warn!(%session, from = %request.from, to = %request.to, %err, "move rejected");
                self.notifier
                    .notify(session, events::ERROR, json!({ "reason": err.reason() }))
                    .await;
                MoveReceipt::rejected(&err)
            }
        }
    }

    async fn use_item(
        &self,
        session: SessionId,
        key: ContainerKey,
        slot: u32,
    ) -> Result<UseReceipt, InventoryError> {
        if !self.sessions.covers(session, &[&key]) {
            return Err(InventoryError::SessionClosed { session });
        }

        let _guard = self.locks.acquire(&key).await?;
        let mut container = self.load_container(&key).await?;

        let Some(item) = container
            .items
            .iter()
            .find(|item| item.slot == slot)
            .cloned()
        else {
            return Ok(UseReceipt { ok: false });
        };

        let definition =
            self.catalog
                .lookup(&item.name)
                .ok_or_else(|| InventoryError::UnknownItem {
                    name: item.name.clone(),
                })?;
        if !definition.usable {
            return Ok(UseReceipt { ok: false });
        }

        // Fire-and-forget: consumers (healing, hunger, ...) react on their
        // own; the engine does not wait for them.
        let payload = serde_json::to_value(&item).unwrap_or(serde_json::Value::Null);
        self.notifier
            .notify(session, events::ITEM_USED, payload)
            .await;

        if self.config.policy_for(definition.category) == UsePolicy::ConsumeOne {
            transfer::remove_items(&mut container.items, &item.name, 1, Some(slot))?;
            self.save_container(&key, container).await?;
            debug!(%session, %key, slot, name = %item.name, "consumed one unit");
            self.notifier
                .notify(session, events::REFRESH, json!({}))
                .await;
        }

        Ok(UseReceipt { ok: true })
    }

    async fn add_item(
        &self,
        key: &ContainerKey,
        name: &str,
        count: u32,
        metadata: Option<ItemMetadata>,
    ) -> Result<(), InventoryError> {
        let definition = self
            .catalog
            .lookup(name)
            .ok_or_else(|| InventoryError::UnknownItem { name: name.into() })?
            .clone();

        let _guard = self.locks.acquire(key).await?;
        let mut container = self.load_container(key).await?;
        transfer::add_items(
            &mut container.items,
            &definition,
            count,
            metadata.unwrap_or_default(),
            container.max_weight,
            self.config.slot_capacity,
        )?;
        self.save_container(key, container).await?;

        debug!(%key, name, count, "items added");
        Ok(())
    }

    async fn remove_item(
        &self,
        key: &ContainerKey,
        name: &str,
        count: u32,
        slot: Option<u32>,
    ) -> Result<(), InventoryError> {
        let _guard = self.locks.acquire(key).await?;
        let mut container = self.load_container(key).await?;
        transfer::remove_items(&mut container.items, name, count, slot)?;
        self.save_container(key, container).await?;

        debug!(%key, name, count, ?slot, "items removed");
        Ok(())
    }

    async fn has_item(
        &self,
        key: &ContainerKey,
        name: &str,
        count: u32,
    ) -> Result<bool, InventoryError> {
        let _guard = self.locks.acquire(key).await?;
        let container = self.load_container(key).await?;
        let total: u32 = container
            .items
            .iter()
            .filter(|item| item.name == name)
            .map(|item| item.count)
            .sum();
        Ok(total >= count)
    }

    async fn delete_container(&self, key: &ContainerKey) -> Result<(), InventoryError> {
        let _guard = self.locks.acquire(key).await?;
        if !self.store.delete(key).await? {
            return Err(InventoryError::ContainerNotFound {
                key: key.to_string(),
            });
        }
        self.cache.evict(key);
        info!(%key, "container deleted");
        Ok(())
    }

    fn item_definition(&self, name: &str) -> Option<ItemDefinition> {
        self.catalog.lookup(name).cloned()
    }
}
