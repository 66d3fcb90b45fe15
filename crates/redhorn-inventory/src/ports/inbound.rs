//! # Inbound Port (Driving API)
//!
//! The operations the inventory subsystem offers to its callers.
//!
//! Session-scoped operations (`open`/`close`/`move`/`use`) serve player
//! requests arriving over the wire; the key-scoped operations
//! (`add`/`remove`/`has`/`delete`) serve server-side scripts and admin
//! tooling and bypass session checks.

use crate::domain::catalog::ItemDefinition;
use crate::domain::container::{
    ContainerKey, InventoryItem, ItemMetadata, SessionId,
};
use crate::domain::errors::InventoryError;
use async_trait::async_trait;

/// Snapshot of one container as handed to a client.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ContainerView {
    pub key: ContainerKey,
    pub label: String,
    pub slot_capacity: u32,
    pub max_weight: u64,
    pub items: Vec<InventoryItem>,
}

/// Result of opening an inventory session: the player's own container and
/// optionally a secondary one (trunk, stash, ...).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OpenInventory {
    pub primary: ContainerView,
    pub secondary: Option<ContainerView>,
}

/// A slot-to-slot move request between (possibly identical) containers.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct MoveRequest {
    pub from: ContainerKey,
    pub to: ContainerKey,
    pub from_slot: u32,
    pub to_slot: u32,
    pub count: u32,
}

/// Outcome of a move reported back to the requesting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MoveReceipt {
    pub ok: bool,
    /// Stable reason code when `ok` is false.
    pub reason: Option<&'static str>,
}

impl MoveReceipt {
    pub fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub fn rejected(err: &InventoryError) -> Self {
        Self {
            ok: false,
            reason: Some(err.reason()),
        }
    }
}

/// Outcome of a use request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct UseReceipt {
    pub ok: bool,
}

/// The inventory subsystem API.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Open an inventory session over one or two containers.
    ///
    /// Containers are created lazily: opening a key the store has never
    /// seen yields a default-empty container with the configured weight
    /// budget. Registers the session scope for subsequent move/use
    /// requests.
    async fn open_inventory(
        &self,
        session: SessionId,
        primary: ContainerKey,
        secondary: Option<ContainerKey>,
    ) -> Result<OpenInventory, InventoryError>;

    /// Close a session (explicit close or disconnect). Idempotent.
    async fn close_inventory(&self, session: SessionId);

    /// Move items between two slots, honoring stacking rules.
    ///
    /// Failures are reported in the receipt as a reason code, never as an
    /// `Err`; move rejection is an expected gameplay outcome.
    async fn move_item(&self, session: SessionId, request: MoveRequest) -> MoveReceipt;

    /// Use the item at `slot`. Not-usable items are a quiet no-op
    /// (`ok: false`); consumable categories lose one unit.
    async fn use_item(
        &self,
        session: SessionId,
        key: ContainerKey,
        slot: u32,
    ) -> Result<UseReceipt, InventoryError>;

    /// Add `count` units of a catalog item to a container. All-or-nothing.
    async fn add_item(
        &self,
        key: &ContainerKey,
        name: &str,
        count: u32,
        metadata: Option<ItemMetadata>,
    ) -> Result<(), InventoryError>;

    /// Remove `count` units of an item, optionally from one slot only.
    async fn remove_item(
        &self,
        key: &ContainerKey,
        name: &str,
        count: u32,
        slot: Option<u32>,
    ) -> Result<(), InventoryError>;

    /// Whether the container holds at least `count` units across all
    /// stacks of `name`.
    async fn has_item(
        &self,
        key: &ContainerKey,
        name: &str,
        count: u32,
    ) -> Result<bool, InventoryError>;

    /// Administrative delete of a container and its cache entry.
    async fn delete_container(&self, key: &ContainerKey) -> Result<(), InventoryError>;

    /// Catalog lookup, exposed for scripts.
    fn item_definition(&self, name: &str) -> Option<ItemDefinition>;
}
