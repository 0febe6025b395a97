//! Policy layer (caller allowlist).
//!
//! Runs in front of every route; rejected requests never reach a handler.

pub mod access;

pub use access::{enforce, AccessGate};
