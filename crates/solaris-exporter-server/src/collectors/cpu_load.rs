use std::sync::Arc;

use solaris_exporter_core::error::Result;
use solaris_exporter_core::{Collector, MetricFamily, TimingGauge};

use super::CPU_LABELS;
use crate::host::HostIdentity;
use crate::sampler::CpuSampler;

pub const CPU_LOAD_FAMILY: &str = "solaris_exporter_cpu_load";
pub const CPU_LOAD_PROCESSING: &str = "solaris_exporter_cpu_load_processing";

/// Statistic label for the 5 minute load average.
///
/// The two trailing spaces are part of the published label value and existing
/// dashboards match on it. Do not trim.
pub const LOAD5M_LABEL: &str = "load5m  ";

/// Load averages and virtual CPU count, as gauges.
pub struct CpuLoadCollector {
    host: HostIdentity,
    sampler: Arc<dyn CpuSampler>,
    timing: Arc<TimingGauge>,
}

impl CpuLoadCollector {
    pub fn new(host: HostIdentity, sampler: Arc<dyn CpuSampler>, timing: Arc<TimingGauge>) -> Self {
        Self {
            host,
            sampler,
            timing,
        }
    }
}

impl Collector for CpuLoadCollector {
    fn collect(&self) -> Result<Vec<MetricFamily>> {
        let _scope = self.timing.time();

        let mut fam = MetricFamily::gauge(
            CPU_LOAD_FAMILY,
            "System load average over 1, 5 and 15 minutes, and virtual CPU count.",
            CPU_LABELS,
        )?;
        let load = self.sampler.load_average()?;
        let host = self.host.as_str();
        fam.add_metric(&[host, "load1m"], load.one)?;
        fam.add_metric(&[host, LOAD5M_LABEL], load.five)?;
        fam.add_metric(&[host, "load15m"], load.fifteen)?;

        // vcpu is the width of a zero-interval per-core sample.
        let vcpu = self.sampler.per_cpu_usage()?.len();
        fam.add_metric(&[host, "vcpu"], vcpu as f64)?;

        Ok(vec![fam])
    }
}
