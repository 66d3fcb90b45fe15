//! # Domain Layer
//!
//! Pure inventory logic with no I/O. Everything here operates on in-memory
//! item lists handed to it by the service layer; nothing retains state
//! across operations.

pub mod capacity;
pub mod catalog;
pub mod config;
pub mod container;
pub mod errors;
pub mod transfer;
