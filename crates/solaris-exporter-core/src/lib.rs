//! solaris-exporter core: metric model, per-scrape registry, text exposition
//! encoder, and the shared error surface.
//!
//! This crate knows nothing about HTTP or the operating system. Sample sources
//! implement [`exposition::Collector`]; the server crate wires real OS samplers
//! into them and serves the encoded output.
//!
//! # Panic policy
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ExporterError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod exposition;
pub mod timing;

/// Shared result type.
pub use error::{ErrorCode, ExporterError, Result};
pub use exposition::{Collector, MetricFamily, MetricKind, MetricSample, Registry};
pub use timing::{TimingGauge, TimingScope};
