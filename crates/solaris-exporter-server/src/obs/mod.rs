//! In-process observability for the exporter itself.
//!
//! Stored as atomics and rendered by the `/metrics/exporter` handler through
//! the same text encoder as scrapes.

pub mod metrics;

pub use metrics::{CounterVec, ExporterMetrics};
