//! Self-timing gauges for sample sources.
//!
//! A `TimingGauge` holds the duration of the most recent run, in seconds, as
//! `f64` bits in an atomic. `TimingGauge::time` hands out a `TimingScope`
//! that records on drop, so an early `?` return or an unwinding panic inside
//! the scope still updates the gauge.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::exposition::MetricFamily;

#[derive(Debug)]
pub struct TimingGauge {
    name: &'static str,
    help: &'static str,
    last_secs: AtomicU64,
    observations: AtomicU64,
}

impl TimingGauge {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            help,
            last_secs: AtomicU64::new(0f64.to_bits()),
            observations: AtomicU64::new(0),
        }
    }

    /// Start a timing scope; the elapsed time is stored when it drops.
    pub fn time(&self) -> TimingScope<'_> {
        TimingScope {
            gauge: self,
            started: Instant::now(),
        }
    }

    pub fn set(&self, d: Duration) {
        self.last_secs.store(d.as_secs_f64().to_bits(), Ordering::Relaxed);
        self.observations.fetch_add(1, Ordering::Relaxed);
    }

    /// Seconds recorded by the most recent scope.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.last_secs.load(Ordering::Relaxed))
    }

    /// Number of scopes that have recorded so far.
    pub fn observations(&self) -> u64 {
        self.observations.load(Ordering::Relaxed)
    }

    /// Snapshot as an unlabeled gauge family.
    pub fn family(&self) -> Result<MetricFamily> {
        let mut fam = MetricFamily::gauge(self.name, self.help, &[])?;
        fam.add_metric(&[], self.get())?;
        Ok(fam)
    }
}

/// Guard returned by [`TimingGauge::time`].
#[must_use = "the scope records when dropped; binding it to `_` drops it immediately"]
pub struct TimingScope<'a> {
    gauge: &'a TimingGauge,
    started: Instant,
}

impl Drop for TimingScope<'_> {
    fn drop(&mut self) {
        self.gauge.set(self.started.elapsed());
    }
}
