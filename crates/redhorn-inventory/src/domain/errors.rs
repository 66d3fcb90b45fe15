//! # Domain Errors
//!
//! Error types for the inventory subsystem.
//!
//! ## Design Principles
//!
//! - Every rejection carries the numbers that triggered it
//! - Each error maps to a stable reason code surfaced to callers
//! - No panics in domain logic; corruption is reported, never "fixed"

use crate::domain::container::{CorruptionDetail, SessionId};
use thiserror::Error;

/// Errors reported by inventory operations.
///
/// None of these are fatal to the process. `LockTimeout` is transient and
/// safe to retry from the request layer; the engine never retries on its
/// own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    /// Item name not present in the catalog.
    #[error("unknown item: {name}")]
    UnknownItem { name: String },

    /// The mutation would push the container past its weight budget.
    #[error("capacity exceeded: total weight {needed} over budget {max_weight}")]
    CapacityExceeded { needed: u64, max_weight: u64 },

    /// All slots of the container are occupied.
    #[error("no free slot: all {slot_capacity} slots occupied")]
    NoFreeSlot { slot_capacity: u32 },

    /// A merge would overfill the destination stack. The move is rejected
    /// rather than quietly discarding or stranding the excess.
    #[error("stack overflow: moving {count} into a stack with space for {space}")]
    StackOverflow { count: u32, space: u32 },

    /// A remove/move requested more units than are available.
    #[error("insufficient quantity: requested {requested}, available {available}")]
    InsufficientQuantity { requested: u32, available: u32 },

    /// A zero or otherwise meaningless quantity was requested.
    #[error("invalid quantity: {count}")]
    InvalidQuantity { count: u32 },

    /// A slot number lies outside `[1, slot_capacity]`.
    #[error("slot {slot} out of range 1..={slot_capacity}")]
    SlotOutOfRange { slot: u32, slot_capacity: u32 },

    /// Administrative delete of a container the store has never seen.
    #[error("container not found: {key}")]
    ContainerNotFound { key: String },

    /// Per-key lock could not be acquired within the configured timeout.
    #[error("timed out waiting for lock on container {key}")]
    LockTimeout { key: String },

    /// The session has no open inventory covering the requested container.
    #[error("session {session} has no open inventory for this request")]
    SessionClosed { session: SessionId },

    /// A persisted container violates structural invariants.
    #[error("corrupt container {key}: {detail}")]
    CorruptContainer {
        key: String,
        detail: CorruptionDetail,
    },

    /// The backing store failed.
    #[error("container store error: {message}")]
    Store { message: String },
}

impl InventoryError {
    /// Stable reason code reported to external callers.
    ///
    /// Weight and slot exhaustion share one code: callers only care that
    /// the container cannot take the items.
    pub fn reason(&self) -> &'static str {
        match self {
            InventoryError::UnknownItem { .. } => "unknown_item",
            InventoryError::CapacityExceeded { .. }
            | InventoryError::NoFreeSlot { .. }
            | InventoryError::StackOverflow { .. } => "capacity_exceeded",
            InventoryError::InsufficientQuantity { .. } => "insufficient_quantity",
            InventoryError::InvalidQuantity { .. } => "invalid_quantity",
            InventoryError::SlotOutOfRange { .. } => "slot_out_of_range",
            InventoryError::ContainerNotFound { .. } => "container_not_found",
            InventoryError::LockTimeout { .. } => "lock_timeout",
            InventoryError::SessionClosed { .. } => "session_closed",
            InventoryError::CorruptContainer { .. } => "corrupt_container",
            InventoryError::Store { .. } => "store_error",
        }
    }

    /// Whether the caller may safely retry the operation as-is.
    pub fn is_transient(&self) -> bool {
        matches!(self, InventoryError::LockTimeout { .. })
    }
}

/// Failure inside a [`ContainerStore`](crate::ports::outbound::ContainerStore)
/// adapter.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        InventoryError::Store {
            message: err.message,
        }
    }
}
