//! Process-wide exporter metrics.
//!
//! These outlive every scrape: the two collector timing gauges, a scrape
//! outcome counter, and the access-gate rejection counter. Counters use
//! dynamic labels backed by `DashMap`; labels are flattened into sorted key
//! vectors so rendering order is deterministic.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use solaris_exporter_core::error::Result;
use solaris_exporter_core::{MetricFamily, TimingGauge};

use crate::collectors::{cpu_load::CPU_LOAD_PROCESSING, cpu_time::CPU_TIME_PROCESSING};

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let key = Self::key(labels);
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for a label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&Self::key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        key
    }

    /// Snapshot as a counter family; `label_names` fixes label order.
    fn family(
        &self,
        name: &'static str,
        help: &'static str,
        label_names: &[&'static str],
    ) -> Result<MetricFamily> {
        let mut rows: Vec<(Vec<(String, String)>, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();

        let mut fam = MetricFamily::counter(name, help, label_names)?;
        for (key, val) in rows {
            let values: Vec<&str> = label_names
                .iter()
                .map(|n| {
                    key.iter()
                        .find(|(k, _)| k == n)
                        .map(|(_, v)| v.as_str())
                        .unwrap_or("")
                })
                .collect();
            fam.add_metric(&values, val as f64)?;
        }
        Ok(fam)
    }
}

pub struct ExporterMetrics {
    pub cpu_time_processing: Arc<TimingGauge>,
    pub cpu_load_processing: Arc<TimingGauge>,
    pub scrapes: CounterVec,
    pub access_denied: AtomicU64,
}

impl ExporterMetrics {
    pub fn new() -> Self {
        let scrapes = CounterVec::default();
        // Both outcomes exist from the first render on.
        scrapes.add(&[("outcome", "ok")], 0);
        scrapes.add(&[("outcome", "error")], 0);

        Self {
            cpu_time_processing: Arc::new(TimingGauge::new(
                CPU_TIME_PROCESSING,
                "Time spent processing request",
            )),
            cpu_load_processing: Arc::new(TimingGauge::new(
                CPU_LOAD_PROCESSING,
                "Time spent processing request",
            )),
            scrapes,
            access_denied: AtomicU64::new(0),
        }
    }

    pub fn record_scrape(&self, ok: bool) {
        let outcome = if ok { "ok" } else { "error" };
        self.scrapes.inc(&[("outcome", outcome)]);
    }

    pub fn record_denied(&self) {
        self.access_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// All exporter self-metrics, in a fixed order.
    pub fn families(&self) -> Result<Vec<MetricFamily>> {
        let mut denied = MetricFamily::counter(
            "solaris_exporter_access_denied_total",
            "Requests rejected because the peer is not the allowed caller.",
            &[],
        )?;
        denied.add_metric(&[], self.access_denied.load(Ordering::Relaxed) as f64)?;

        Ok(vec![
            self.cpu_time_processing.family()?,
            self.cpu_load_processing.family()?,
            self.scrapes.family(
                "solaris_exporter_scrapes_total",
                "Scrapes of /metrics by outcome.",
                &["outcome"],
            )?,
            denied,
        ])
    }
}

impl Default for ExporterMetrics {
    fn default() -> Self {
        Self::new()
    }
}
