use std::collections::HashSet;

use crate::error::{ExporterError, Result};

use super::family::MetricFamily;

/// A sample source. Produces its families on demand; called once per scrape.
pub trait Collector: Send + Sync {
    fn collect(&self) -> Result<Vec<MetricFamily>>;
}

/// Per-scrape collection of sample sources.
///
/// Built fresh for every request and dropped with it, so nothing registered
/// here leaks into the next scrape. Gathering preserves registration order.
#[derive(Default)]
pub struct Registry {
    collectors: Vec<Box<dyn Collector>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            collectors: Vec::new(),
        }
    }

    pub fn register<C: Collector + 'static>(&mut self, collector: C) {
        self.collectors.push(Box::new(collector));
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    /// Run every collector in registration order.
    ///
    /// The first failing collector aborts the gather; nothing collected so far
    /// is returned. A family name produced twice is an error.
    pub fn gather(&self) -> Result<Vec<MetricFamily>> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for c in &self.collectors {
            for fam in c.collect()? {
                if !seen.insert(fam.name().to_string()) {
                    return Err(ExporterError::DuplicateFamily(fam.name().to_string()));
                }
                out.push(fam);
            }
        }
        Ok(out)
    }
}
