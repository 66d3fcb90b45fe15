//! # Inventory Engine
//!
//! The inventory subsystem is the authoritative owner of all item containers
//! in a Redhorn server: player backpacks, vehicle trunks and gloveboxes,
//! stashes, ground drops, and shops.
//!
//! ## Responsibilities
//!
//! - Enforce weight budgets and slot capacities per container
//! - Stack, split, and atomically move items between containers
//! - Mediate between an in-memory cache and the durable container store
//! - Coordinate item use (notify consumers, apply consumption policies)
//!
//! ## Domain Invariants
//!
//! | # | Invariant | Description |
//! |---|-----------|-------------|
//! | 1 | Weight Budget | `sum(weight * count) <= max_weight` after every mutation |
//! | 2 | Slot Uniqueness | No two items of a container share a slot |
//! | 3 | Slot Range | Every slot is in `[1, slot_capacity]` |
//! | 4 | Positive Count | `count >= 1`; zero-count entries are never persisted |
//! | 5 | Stack Bound | Stackable items never exceed `max_stack` per slot |
//! | 6 | All-or-Nothing | A failed add/remove/move leaves both containers untouched |
//! | 7 | Write-Through | A save is durable before the cache is refreshed |
//! | 8 | Key Isolation | Operations on different containers never block each other |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure domain logic (catalog, containers, capacity, transfer)
//! - `ports/` - Port traits (inbound API, outbound SPI) and shipped adapters
//! - `service/` - Application service: cache, per-key locks, sessions
//!
//! ## Usage
//!
//! ```ignore
//! use redhorn_inventory::{InventoryApi, InventoryConfig, InventoryService, ItemCatalog};
//!
//! // Create service with in-memory adapters
//! let catalog = ItemCatalog::from_json_str(include_str!("../items.json"))?;
//! let service = InventoryService::new_in_memory(catalog, InventoryConfig::default());
//!
//! // Give a player an item
//! service.add_item(&player_key, "bandage", 3, None).await?;
//! ```

pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use domain::catalog::{ItemCatalog, ItemCategory, ItemDefinition};
pub use domain::config::{InventoryConfig, UsePolicy};
pub use domain::container::{
    ContainerKey, ContainerKind, CorruptionDetail, InventoryItem, ItemMetadata, SessionId,
    StoredContainer,
};
pub use domain::errors::{InventoryError, StoreError};
pub use domain::transfer::MoveOutcome;
pub use ports::inbound::{
    ContainerView, InventoryApi, MoveReceipt, MoveRequest, OpenInventory, UseReceipt,
};
pub use ports::outbound::{
    ContainerStore, InMemoryContainerStore, JsonFileStore, ManualTimeSource, NotificationSink,
    NullNotificationSink, RecordingNotificationSink, SystemTimeSource, TimeSource,
};
pub use service::{InventoryDependencies, InventoryService};
