//! Built-in sample sources.
//!
//! Each collector owns handles to the host identity, the CPU sampler and its
//! own timing gauge; nothing is looked up globally at collect time.

pub mod cpu_load;
pub mod cpu_time;

pub use cpu_load::CpuLoadCollector;
pub use cpu_time::CpuTimeCollector;

/// Label names shared by both CPU families.
pub const CPU_LABELS: &[&str] = &["host", "statistic"];
