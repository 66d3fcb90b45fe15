//! # Containers and Items
//!
//! Entities for slotted, capacity-bounded item containers and the item
//! instances inside them, plus the integrity check applied to every record
//! loaded from the durable store.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Per-instance item state (durability, serial numbers, ...).
pub type ItemMetadata = serde_json::Map<String, serde_json::Value>;

/// Semantic class of a container.
///
/// The kind participates in the store key, so two containers of different
/// kinds may share the same id string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Player,
    Vehicle,
    Stash,
    Glovebox,
    Trunk,
    Drop,
    Shop,
}

impl ContainerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Player => "player",
            ContainerKind::Vehicle => "vehicle",
            ContainerKind::Stash => "stash",
            ContainerKind::Glovebox => "glovebox",
            ContainerKind::Trunk => "trunk",
            ContainerKind::Drop => "drop",
            ContainerKind::Shop => "shop",
        }
    }

    /// Display label used when a container is opened without a custom label.
    pub fn default_label(&self) -> &'static str {
        match self {
            ContainerKind::Player => "Inventory",
            ContainerKind::Vehicle => "Vehicle",
            ContainerKind::Stash => "Stash",
            ContainerKind::Glovebox => "Glovebox",
            ContainerKind::Trunk => "Trunk",
            ContainerKind::Drop => "Drop",
            ContainerKind::Shop => "Shop",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(ContainerKind::Player),
            "vehicle" => Ok(ContainerKind::Vehicle),
            "stash" => Ok(ContainerKind::Stash),
            "glovebox" => Ok(ContainerKind::Glovebox),
            "trunk" => Ok(ContainerKind::Trunk),
            "drop" => Ok(ContainerKind::Drop),
            "shop" => Ok(ContainerKind::Shop),
            other => Err(format!("unknown container kind: {other}")),
        }
    }
}

/// Composite key addressing one container: `(kind, id)`.
///
/// The derived total order (kind first, then id) is the global lock order
/// for two-container operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerKey {
    pub kind: ContainerKind,
    pub id: String,
}

impl ContainerKey {
    pub fn new(kind: ContainerKind, id: impl Into<String>) -> Self {
        Self { kind, id: id.into() }
    }

    pub fn player(id: impl Into<String>) -> Self {
        Self::new(ContainerKind::Player, id)
    }

    /// Key for a fresh ground-drop container with a random id.
    pub fn new_drop() -> Self {
        Self::new(ContainerKind::Drop, Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for ContainerKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("container key missing ':' separator: {s}"))?;
        if id.is_empty() {
            return Err(format!("container key has empty id: {s}"));
        }
        Ok(Self::new(kind.parse::<ContainerKind>()?, id))
    }
}

/// A client session (one per connected player).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One item instance occupying a slot of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// 1-based slot number, unique within the container.
    pub slot: u32,
    /// References an [`ItemDefinition`](crate::domain::catalog::ItemDefinition).
    pub name: String,
    /// Denormalized display name.
    pub label: String,
    /// Units in this slot. Always >= 1; non-stackable items always hold 1.
    pub count: u32,
    /// Denormalized weight per unit.
    pub weight: u64,
    #[serde(default)]
    pub metadata: ItemMetadata,
    #[serde(default)]
    pub image: String,
}

/// The durable record of one container, as held by the container store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContainer {
    /// Weight budget in abstract units.
    pub max_weight: u64,
    pub items: Vec<InventoryItem>,
}

impl StoredContainer {
    /// A fresh, empty container with the given weight budget.
    pub fn empty(max_weight: u64) -> Self {
        Self {
            max_weight,
            items: Vec::new(),
        }
    }
}

/// Invariant violation found in a persisted container.
///
/// A record exhibiting any of these is treated as corrupt: repaired data
/// could duplicate or destroy items, so the engine refuses to guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionDetail {
    /// Two items share the same slot number.
    DuplicateSlot { slot: u32 },
    /// An item was persisted with a zero count.
    ZeroCount { slot: u32 },
    /// A slot number lies outside `[1, slot_capacity]`.
    SlotOutOfRange { slot: u32, slot_capacity: u32 },
}

impl fmt::Display for CorruptionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorruptionDetail::DuplicateSlot { slot } => {
                write!(f, "duplicate slot {slot}")
            }
            CorruptionDetail::ZeroCount { slot } => {
                write!(f, "zero count in slot {slot}")
            }
            CorruptionDetail::SlotOutOfRange { slot, slot_capacity } => {
                write!(f, "slot {slot} outside 1..={slot_capacity}")
            }
        }
    }
}

/// Check the structural invariants of a loaded item list.
///
/// Returns the first violation found, scanning in list order.
pub fn validate_items(
    items: &[InventoryItem],
    slot_capacity: u32,
) -> Result<(), CorruptionDetail> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.count == 0 {
            return Err(CorruptionDetail::ZeroCount { slot: item.slot });
        }
        if item.slot == 0 || item.slot > slot_capacity {
            return Err(CorruptionDetail::SlotOutOfRange {
                slot: item.slot,
                slot_capacity,
            });
        }
        if !seen.insert(item.slot) {
            return Err(CorruptionDetail::DuplicateSlot { slot: item.slot });
        }
    }
    Ok(())
}
