//! solaris-exporter server library entry.
//!
//! Wires the caller gate, CPU sample sources, scrape coordinator and HTTP
//! endpoints into one stack. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod collectors;
pub mod config;
pub mod host;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod sampler;
pub mod router;
pub mod scrape;
pub mod serve;
