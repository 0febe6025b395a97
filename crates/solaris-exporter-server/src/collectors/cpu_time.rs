use std::sync::Arc;

use solaris_exporter_core::error::Result;
use solaris_exporter_core::{Collector, MetricFamily, TimingGauge};

use super::CPU_LABELS;
use crate::host::HostIdentity;
use crate::sampler::CpuSampler;

pub const CPU_TIME_FAMILY: &str = "solaris_exporter_cpu_time";
pub const CPU_TIME_PROCESSING: &str = "solaris_exporter_cpu_time_processing";

/// Cumulative CPU time per mode, as counters.
pub struct CpuTimeCollector {
    host: HostIdentity,
    sampler: Arc<dyn CpuSampler>,
    timing: Arc<TimingGauge>,
}

impl CpuTimeCollector {
    pub fn new(host: HostIdentity, sampler: Arc<dyn CpuSampler>, timing: Arc<TimingGauge>) -> Self {
        Self {
            host,
            sampler,
            timing,
        }
    }
}

impl Collector for CpuTimeCollector {
    fn collect(&self) -> Result<Vec<MetricFamily>> {
        let _scope = self.timing.time();

        let mut fam = MetricFamily::counter(
            CPU_TIME_FAMILY,
            "CPU usage time in seconds since boot, summed over all CPUs.",
            CPU_LABELS,
        )?;
        let t = self.sampler.cpu_times()?;

        let host = self.host.as_str();
        for (stat, v) in [
            ("user", t.user),
            ("system", t.system),
            ("idle", t.idle),
            ("nice", t.nice),
        ] {
            fam.add_metric(&[host, stat], v)?;
        }
        Ok(vec![fam])
    }
}
