//! # Capacity Engine
//!
//! Weight totals and free-slot search. Both are pure scans over an item
//! list; slot search is deterministic lowest-first so placement is
//! predictable and testable.

use crate::domain::container::InventoryItem;
use std::collections::HashSet;

/// Total weight of an item list: `sum(weight * count)`.
pub fn total_weight(items: &[InventoryItem]) -> u64 {
    items
        .iter()
        .map(|item| item.weight * u64::from(item.count))
        .sum()
}

/// First unused slot in `1..=slot_capacity`, ascending.
///
/// Returns `None` when every slot is occupied.
pub fn find_free_slot(items: &[InventoryItem], slot_capacity: u32) -> Option<u32> {
    let used: HashSet<u32> = items.iter().map(|item| item.slot).collect();
    (1..=slot_capacity).find(|slot| !used.contains(slot))
}

/// Whether `slot` is a valid slot number for the given capacity.
pub fn slot_in_range(slot: u32, slot_capacity: u32) -> bool {
    slot >= 1 && slot <= slot_capacity
}
