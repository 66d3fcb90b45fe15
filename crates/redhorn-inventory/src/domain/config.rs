//! # Configuration
//!
//! Immutable configuration value objects for the inventory subsystem.
//!
//! All values have production defaults and builder-style overrides for
//! per-deployment tuning.

use crate::domain::catalog::ItemCategory;
use std::collections::HashMap;
use std::time::Duration;

/// What happens to an item after a successful use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsePolicy {
    /// Remove exactly one unit from the used slot.
    ConsumeOne,
    /// Leave the item untouched (weapons, tools, ...).
    Keep,
}

/// Configuration for the inventory engine.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Weight budget per container, in abstract units (default: 100_000).
    pub max_weight: u64,

    /// Occupied-slot limit per container (default: 40).
    pub slot_capacity: u32,

    /// Maximum age at which a cached container snapshot may be returned
    /// without re-reading the backing store (default: 5 s).
    pub cache_freshness: Duration,

    /// Bounded wait for a per-container lock (default: 1 s). Expiry is
    /// reported as a transient `LockTimeout`.
    pub lock_timeout: Duration,

    /// Post-use policy per item category. Categories absent from the table
    /// default to [`UsePolicy::Keep`].
    pub use_policies: HashMap<ItemCategory, UsePolicy>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            max_weight: 100_000,
            slot_capacity: 40,
            cache_freshness: Duration::from_secs(5),
            lock_timeout: Duration::from_secs(1),
            use_policies: default_use_policies(),
        }
    }
}

impl InventoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-container weight budget.
    pub fn with_max_weight(mut self, max_weight: u64) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Set the per-container slot limit.
    pub fn with_slot_capacity(mut self, slot_capacity: u32) -> Self {
        self.slot_capacity = slot_capacity;
        self
    }

    /// Set the cache freshness window.
    pub fn with_cache_freshness(mut self, freshness: Duration) -> Self {
        self.cache_freshness = freshness;
        self
    }

    /// Set the per-key lock acquisition timeout.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Override the post-use policy for one category.
    pub fn with_use_policy(mut self, category: ItemCategory, policy: UsePolicy) -> Self {
        self.use_policies.insert(category, policy);
        self
    }

    /// Post-use policy for a category.
    pub fn policy_for(&self, category: ItemCategory) -> UsePolicy {
        self.use_policies
            .get(&category)
            .copied()
            .unwrap_or(UsePolicy::Keep)
    }
}

/// Consumables are eaten/drunk/applied; everything else survives use.
fn default_use_policies() -> HashMap<ItemCategory, UsePolicy> {
    HashMap::from([
        (ItemCategory::Food, UsePolicy::ConsumeOne),
        (ItemCategory::Drink, UsePolicy::ConsumeOne),
        (ItemCategory::Medical, UsePolicy::ConsumeOne),
    ])
}
