//! Metric model and Prometheus text exposition.
//!
//! - `family`: `MetricFamily` / `MetricSample` / `MetricKind`
//! - `registry`: the `Collector` contract and the per-scrape `Registry`
//! - `text`: text format 0.0.4 encoder

pub mod family;
pub mod registry;
pub mod text;

pub use family::{MetricFamily, MetricKind, MetricSample};
pub use registry::{Collector, Registry};
pub use text::{encode, CONTENT_TYPE};
