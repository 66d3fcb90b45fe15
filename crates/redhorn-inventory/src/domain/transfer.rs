//! # Transfer Engine
//!
//! Add, remove, and move items between in-memory item lists.
//!
//! All functions here are pure list surgery: the service layer hands them a
//! working copy of the cached snapshot and only persists it when the
//! operation succeeds, so every failure path leaves the containers exactly
//! as they were.
//!
//! A move resolves the destination slot into one of three outcomes:
//!
//! | Destination | Outcome |
//! |-------------|---------|
//! | empty | relocate (full count) or split (partial count) |
//! | same item, stackable | merge into the destination stack |
//! | different item, or non-stackable same item | unconditional slot swap |

use crate::domain::capacity::{find_free_slot, slot_in_range, total_weight};
use crate::domain::catalog::{ItemCatalog, ItemDefinition};
use crate::domain::container::{InventoryItem, ItemMetadata};
use crate::domain::errors::InventoryError;

/// Slot-to-slot move parameters, independent of the containers involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSpec {
    pub from_slot: u32,
    pub to_slot: u32,
    pub count: u32,
}

/// How a move was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The whole source entry now lives at the destination slot.
    Relocated,
    /// Part of the source stack was split into a new destination entry.
    Split,
    /// Units were absorbed into an existing destination stack.
    Merged { transferred: u32 },
    /// Source and destination items exchanged slots.
    Swapped,
}

/// Add `count` units of a catalog item to a list.
///
/// The weight check runs against the full requested count up front; the
/// operation is all-or-nothing. Stackable items top up the first
/// partially-filled stack before claiming free slots.
pub fn add_items(
    items: &mut Vec<InventoryItem>,
    definition: &ItemDefinition,
    count: u32,
    metadata: ItemMetadata,
    max_weight: u64,
    slot_capacity: u32,
) -> Result<(), InventoryError> {
    if count == 0 {
        return Err(InventoryError::InvalidQuantity { count });
    }

    let needed = total_weight(items) + definition.weight * u64::from(count);
    if needed > max_weight {
        return Err(InventoryError::CapacityExceeded { needed, max_weight });
    }

    let limit = definition.stack_limit();
    let mut remaining = count;

    // Top up one partially-filled stack of the same item first.
    if definition.stackable {
        if let Some(stack) = items
            .iter_mut()
            .find(|item| item.name == definition.name && item.count < limit)
        {
            let absorbed = remaining.min(limit - stack.count);
            stack.count += absorbed;
            remaining -= absorbed;
        }
    }

    // Claim free slots for whatever is left, lowest slot first.
    while remaining > 0 {
        let slot = find_free_slot(items, slot_capacity)
            .ok_or(InventoryError::NoFreeSlot { slot_capacity })?;
        let placed = if definition.stackable {
            remaining.min(limit)
        } else {
            1
        };
        items.push(InventoryItem {
            slot,
            name: definition.name.clone(),
            label: definition.label.clone(),
            count: placed,
            weight: definition.weight,
            metadata: metadata.clone(),
            image: definition.image.clone(),
        });
        remaining -= placed;
    }

    Ok(())
}

/// Remove `count` units of an item, optionally restricted to one slot.
///
/// Candidates are consumed greedily in list order. If the matching stacks
/// hold fewer than `count` units in total the list is left untouched.
pub fn remove_items(
    items: &mut Vec<InventoryItem>,
    name: &str,
    count: u32,
    slot: Option<u32>,
) -> Result<(), InventoryError> {
    if count == 0 {
        return Err(InventoryError::InvalidQuantity { count });
    }

    let matches = |item: &InventoryItem| {
        item.name == name && slot.map_or(true, |wanted| item.slot == wanted)
    };

    let available: u32 = items
        .iter()
        .filter(|item| matches(item))
        .map(|item| item.count)
        .sum();
    if available < count {
        return Err(InventoryError::InsufficientQuantity {
            requested: count,
            available,
        });
    }

    let mut remaining = count;
    let mut idx = 0;
    while idx < items.len() && remaining > 0 {
        if !matches(&items[idx]) {
            idx += 1;
            continue;
        }
        if items[idx].count <= remaining {
            remaining -= items[idx].count;
            items.remove(idx);
        } else {
            items[idx].count -= remaining;
            remaining = 0;
        }
    }

    Ok(())
}

/// Move items between two slots of the same container.
pub fn move_within(
    items: &mut Vec<InventoryItem>,
    catalog: &ItemCatalog,
    spec: MoveSpec,
    slot_capacity: u32,
) -> Result<MoveOutcome, InventoryError> {
    validate_spec(spec, slot_capacity)?;
    let src_idx = source_index(items, spec)?;
    if spec.from_slot == spec.to_slot {
        // True no-op; never fabricates or merges an entry with itself. The
        // source must still exist with the requested count available.
        return Ok(MoveOutcome::Relocated);
    }

    let dst_idx = items.iter().position(|item| item.slot == spec.to_slot);

    match dst_idx {
        None => {
            if items[src_idx].count == spec.count {
                items[src_idx].slot = spec.to_slot;
                Ok(MoveOutcome::Relocated)
            } else {
                let entry = split_entry(&mut items[src_idx], spec);
                items.push(entry);
                Ok(MoveOutcome::Split)
            }
        }
        Some(dst_idx) => {
            if let Some(limit) = merge_limit(catalog, &items[src_idx], &items[dst_idx])? {
                let space = limit - items[dst_idx].count;
                if spec.count > space {
                    return Err(InventoryError::StackOverflow {
                        count: spec.count,
                        space,
                    });
                }
                items[dst_idx].count += spec.count;
                items[src_idx].count -= spec.count;
                if items[src_idx].count == 0 {
                    items.remove(src_idx);
                }
                Ok(MoveOutcome::Merged {
                    transferred: spec.count,
                })
            } else {
                items[src_idx].slot = spec.to_slot;
                items[dst_idx].slot = spec.from_slot;
                Ok(MoveOutcome::Swapped)
            }
        }
    }
}

/// Move items from one container's list into another's.
///
/// Unlike [`move_within`], the destination (and for swaps, both sides)
/// gains weight, so the affected weight budgets are enforced here.
pub fn move_across(
    from_items: &mut Vec<InventoryItem>,
    from_max_weight: u64,
    to_items: &mut Vec<InventoryItem>,
    to_max_weight: u64,
    catalog: &ItemCatalog,
    spec: MoveSpec,
    slot_capacity: u32,
) -> Result<MoveOutcome, InventoryError> {
    validate_spec(spec, slot_capacity)?;

    let src_idx = source_index(from_items, spec)?;
    let moved_weight = from_items[src_idx].weight * u64::from(spec.count);
    let dst_idx = to_items.iter().position(|item| item.slot == spec.to_slot);

    match dst_idx {
        None => {
            check_budget(total_weight(to_items) + moved_weight, to_max_weight)?;
            if from_items[src_idx].count == spec.count {
                let mut entry = from_items.remove(src_idx);
                entry.slot = spec.to_slot;
                to_items.push(entry);
                Ok(MoveOutcome::Relocated)
            } else {
                let entry = split_entry(&mut from_items[src_idx], spec);
                to_items.push(entry);
                Ok(MoveOutcome::Split)
            }
        }
        Some(dst_idx) => {
            if let Some(limit) = merge_limit(catalog, &from_items[src_idx], &to_items[dst_idx])? {
                let space = limit - to_items[dst_idx].count;
                if spec.count > space {
                    return Err(InventoryError::StackOverflow {
                        count: spec.count,
                        space,
                    });
                }
                check_budget(total_weight(to_items) + moved_weight, to_max_weight)?;
                to_items[dst_idx].count += spec.count;
                from_items[src_idx].count -= spec.count;
                if from_items[src_idx].count == 0 {
                    from_items.remove(src_idx);
                }
                Ok(MoveOutcome::Merged {
                    transferred: spec.count,
                })
            } else {
                // Swap exchanges whole entries, so both budgets shift.
                let src_weight =
                    from_items[src_idx].weight * u64::from(from_items[src_idx].count);
                let dst_weight = to_items[dst_idx].weight * u64::from(to_items[dst_idx].count);
                check_budget(
                    total_weight(to_items) - dst_weight + src_weight,
                    to_max_weight,
                )?;
                check_budget(
                    total_weight(from_items) - src_weight + dst_weight,
                    from_max_weight,
                )?;

                let mut src_entry = from_items.remove(src_idx);
                let mut dst_entry = to_items.remove(dst_idx);
                src_entry.slot = spec.to_slot;
                dst_entry.slot = spec.from_slot;
                to_items.push(src_entry);
                from_items.push(dst_entry);
                Ok(MoveOutcome::Swapped)
            }
        }
    }
}

fn check_budget(needed: u64, max_weight: u64) -> Result<(), InventoryError> {
    if needed > max_weight {
        return Err(InventoryError::CapacityExceeded { needed, max_weight });
    }
    Ok(())
}

fn validate_spec(spec: MoveSpec, slot_capacity: u32) -> Result<(), InventoryError> {
    if spec.count == 0 {
        return Err(InventoryError::InvalidQuantity { count: 0 });
    }
    for slot in [spec.from_slot, spec.to_slot] {
        if !slot_in_range(slot, slot_capacity) {
            return Err(InventoryError::SlotOutOfRange {
                slot,
                slot_capacity,
            });
        }
    }
    Ok(())
}

/// Index of the source entry, with the requested count available.
fn source_index(items: &[InventoryItem], spec: MoveSpec) -> Result<usize, InventoryError> {
    let idx = items
        .iter()
        .position(|item| item.slot == spec.from_slot)
        .ok_or(InventoryError::InsufficientQuantity {
            requested: spec.count,
            available: 0,
        })?;
    if items[idx].count < spec.count {
        return Err(InventoryError::InsufficientQuantity {
            requested: spec.count,
            available: items[idx].count,
        });
    }
    Ok(idx)
}

/// Stack limit when source and destination can merge, `None` when the
/// collision resolves as a swap instead.
fn merge_limit(
    catalog: &ItemCatalog,
    source: &InventoryItem,
    destination: &InventoryItem,
) -> Result<Option<u32>, InventoryError> {
    if source.name != destination.name {
        return Ok(None);
    }
    let definition =
        catalog
            .lookup(&destination.name)
            .ok_or_else(|| InventoryError::UnknownItem {
                name: destination.name.clone(),
            })?;
    if definition.stackable {
        Ok(Some(definition.stack_limit()))
    } else {
        Ok(None)
    }
}

/// Carve `spec.count` units off the source entry into a new entry at the
/// destination slot, copying metadata.
fn split_entry(source: &mut InventoryItem, spec: MoveSpec) -> InventoryItem {
    source.count -= spec.count;
    InventoryItem {
        slot: spec.to_slot,
        count: spec.count,
        ..source.clone()
    }
}
