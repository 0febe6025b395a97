//! Host CPU samplers.
//!
//! Sample sources read the OS through `CpuSampler` so a scrape can run against
//! the live host (`OsSampler`) or a scripted one in tests.

pub mod os;

use solaris_exporter_core::error::Result;

pub use os::OsSampler;

/// Cumulative per-mode CPU time since boot, in seconds, summed over all CPUs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuTimes {
    pub user: f64,
    pub system: f64,
    pub idle: f64,
    pub nice: f64,
}

/// 1/5/15 minute run-queue load averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadAverage {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

pub trait CpuSampler: Send + Sync {
    fn cpu_times(&self) -> Result<CpuTimes>;

    fn load_average(&self) -> Result<LoadAverage>;

    /// Per-core utilization since the previous call, without waiting.
    /// One entry per virtual CPU.
    fn per_cpu_usage(&self) -> Result<Vec<f32>>;
}
