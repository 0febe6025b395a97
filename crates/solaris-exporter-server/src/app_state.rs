//! Shared application state for the exporter.
//!
//! Everything here is resolved once at startup and then only read: config,
//! caller gate, host identity, scrape coordinator, self-metrics.

use std::sync::Arc;

use solaris_exporter_core::error::Result;

use crate::config::ExporterConfig;
use crate::host::HostIdentity;
use crate::obs::ExporterMetrics;
use crate::policy::AccessGate;
use crate::sampler::{CpuSampler, OsSampler};
use crate::scrape::ScrapeCoordinator;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    gate: AccessGate,
    host: HostIdentity,
    coordinator: ScrapeCoordinator,
    metrics: Arc<ExporterMetrics>,
}

impl AppState {
    /// Build state against the live OS.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let host = match &cfg.exporter.host_label {
            Some(label) => HostIdentity::new(label.clone()),
            None => HostIdentity::resolve()?,
        };
        Self::with_sampler(cfg, host, Arc::new(OsSampler::new()))
    }

    /// Build state with an explicit host identity and sampler.
    pub fn with_sampler(
        cfg: ExporterConfig,
        host: HostIdentity,
        sampler: Arc<dyn CpuSampler>,
    ) -> Result<Self> {
        let gate = AccessGate::new(cfg.exporter.allowed_caller_ip()?);
        let metrics = Arc::new(ExporterMetrics::new());
        let coordinator = ScrapeCoordinator::new(host.clone(), sampler, Arc::clone(&metrics));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                gate,
                host,
                coordinator,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn access_gate(&self) -> &AccessGate {
        &self.inner.gate
    }

    pub fn host(&self) -> &HostIdentity {
        &self.inner.host
    }

    pub fn coordinator(&self) -> &ScrapeCoordinator {
        &self.inner.coordinator
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }
}
