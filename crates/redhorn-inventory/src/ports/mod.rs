//! # Ports
//!
//! Boundary traits of the inventory subsystem.
//!
//! - `inbound` - the API offered to the rest of the server (net event
//!   handlers, job scripts, admin tooling)
//! - `outbound` - the dependencies this subsystem requires the host to
//!   provide (container store, notification sink, time source), plus the
//!   adapters shipped with the crate

pub mod inbound;
pub mod outbound;
