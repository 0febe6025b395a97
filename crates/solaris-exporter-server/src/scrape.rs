//! Per-request scrape assembly.

use std::sync::Arc;

use solaris_exporter_core::error::Result;
use solaris_exporter_core::exposition::encode;
use solaris_exporter_core::Registry;

use crate::collectors::{CpuLoadCollector, CpuTimeCollector};
use crate::host::HostIdentity;
use crate::obs::ExporterMetrics;
use crate::sampler::CpuSampler;

/// Builds a fresh `Registry` for every scrape and encodes its output.
///
/// Holds only shared, read-only handles, so one coordinator serves all
/// concurrent requests. Blocking: call from a blocking worker.
#[derive(Clone)]
pub struct ScrapeCoordinator {
    host: HostIdentity,
    sampler: Arc<dyn CpuSampler>,
    metrics: Arc<ExporterMetrics>,
}

impl ScrapeCoordinator {
    pub fn new(host: HostIdentity, sampler: Arc<dyn CpuSampler>, metrics: Arc<ExporterMetrics>) -> Self {
        Self {
            host,
            sampler,
            metrics,
        }
    }

    /// A new registry with CPU-Time then CPU-Load registered.
    pub fn registry(&self) -> Registry {
        let mut registry = Registry::new();
        registry.register(CpuTimeCollector::new(
            self.host.clone(),
            Arc::clone(&self.sampler),
            Arc::clone(&self.metrics.cpu_time_processing),
        ));
        registry.register(CpuLoadCollector::new(
            self.host.clone(),
            Arc::clone(&self.sampler),
            Arc::clone(&self.metrics.cpu_load_processing),
        ));
        registry
    }

    /// Collect and encode. Any collector failure fails the whole scrape.
    pub fn scrape(&self) -> Result<String> {
        let registry = self.registry();
        let families = registry.gather()?;
        Ok(encode(&families))
    }
}
