//! # Redhorn Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-module flows over real adapters
//!     ├── flows.rs      # Session flows: open, add, move, use, close
//!     ├── persistence.rs# File-backed store across service restarts
//!     └── concurrency.rs# Parallel operations and item conservation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p redhorn-tests
//!
//! # By category
//! cargo test -p redhorn-tests integration::flows
//! cargo test -p redhorn-tests integration::concurrency
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
