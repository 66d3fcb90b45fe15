//! # Item Catalog
//!
//! Read-only lookup of item definitions by name.
//!
//! Definitions are loaded once at server startup (typically from a JSON item
//! table) and never mutated at runtime. An unknown item name is reported as
//! `None`, never as a panic; callers treat it as a failed precondition for
//! the operation in progress.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Gameplay category of an item.
///
/// The category drives post-use behavior through the configurable
/// [`UsePolicy`](crate::domain::config::UsePolicy) table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Ammo,
    Food,
    Drink,
    Medical,
    Crafting,
    Clothing,
    Misc,
}

/// Immutable definition of an item type.
///
/// One entry per item `name`; inventory items denormalize `label`, `weight`,
/// and `image` from here at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique key referencing this definition.
    pub name: String,
    /// Display name.
    pub label: String,
    /// Flavor/help text shown in tooltips.
    #[serde(default)]
    pub description: String,
    /// Weight per unit, in abstract weight units.
    pub weight: u64,
    /// Whether multiple units may share a slot.
    pub stackable: bool,
    /// Maximum units per slot. Meaningful only when `stackable` is true.
    pub max_stack: u32,
    /// Whether the item can be used from the inventory.
    pub usable: bool,
    /// Advisory flag: at most one instance should exist per character.
    #[serde(default)]
    pub unique: bool,
    /// Icon reference for the client.
    #[serde(default)]
    pub image: String,
    pub category: ItemCategory,
}

impl ItemDefinition {
    /// Units a single slot of this item may hold.
    pub fn stack_limit(&self) -> u32 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }
}

/// The item definition table.
///
/// Loaded once at startup; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemDefinition>,
}

impl ItemCatalog {
    /// Build a catalog from a list of definitions.
    ///
    /// Later entries with a duplicate name replace earlier ones.
    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = ItemDefinition>,
    {
        let items = definitions
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Self { items }
    }

    /// Parse a catalog from a JSON array of item definitions.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let definitions: Vec<ItemDefinition> = serde_json::from_str(json)?;
        Ok(Self::from_definitions(definitions))
    }

    /// Look up a definition by item name.
    pub fn lookup(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.get(name)
    }

    /// Number of known item definitions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
