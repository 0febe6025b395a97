use crate::error::{ExporterError, Result};

/// Kind of a metric family as written on its `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// One observation inside a family. Labels keep the family's declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub labels: Vec<(String, String)>,
    pub value: f64,
}

impl MetricSample {
    /// Value of label `name`, if present.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Named group of samples sharing kind, help text and label names.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    name: String,
    help: String,
    kind: MetricKind,
    label_names: Vec<&'static str>,
    samples: Vec<MetricSample>,
}

impl MetricFamily {
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        kind: MetricKind,
        label_names: &[&'static str],
    ) -> Result<Self> {
        let name = name.into();
        if !is_valid_name(&name, true) {
            return Err(ExporterError::InvalidName(name));
        }
        for l in label_names {
            if !is_valid_name(l, false) || l.starts_with("__") {
                return Err(ExporterError::InvalidName(format!("{name}: label {l}")));
            }
        }
        Ok(Self {
            name,
            help: help.into(),
            kind,
            label_names: label_names.to_vec(),
            samples: Vec::with_capacity(4),
        })
    }

    pub fn counter(
        name: impl Into<String>,
        help: impl Into<String>,
        label_names: &[&'static str],
    ) -> Result<Self> {
        Self::new(name, help, MetricKind::Counter, label_names)
    }

    pub fn gauge(
        name: impl Into<String>,
        help: impl Into<String>,
        label_names: &[&'static str],
    ) -> Result<Self> {
        Self::new(name, help, MetricKind::Gauge, label_names)
    }

    /// Append a sample. `label_values` must match the declared label names
    /// one-to-one, in order.
    pub fn add_metric(&mut self, label_values: &[&str], value: f64) -> Result<()> {
        if label_values.len() != self.label_names.len() {
            return Err(ExporterError::LabelMismatch {
                family: self.name.clone(),
                expected: self.label_names.len(),
                got: label_values.len(),
            });
        }
        let labels = self
            .label_names
            .iter()
            .zip(label_values)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.samples.push(MetricSample { labels, value });
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// First sample whose label `name` equals `value`.
    pub fn sample_where(&self, name: &str, value: &str) -> Option<&MetricSample> {
        self.samples.iter().find(|s| s.label(name) == Some(value))
    }
}

// [a-zA-Z_:][a-zA-Z0-9_:]* for metric names; labels drop the colon.
fn is_valid_name(s: &str, allow_colon: bool) -> bool {
    let ok_first = |c: char| c.is_ascii_alphabetic() || c == '_' || (allow_colon && c == ':');
    let ok_rest = |c: char| ok_first(c) || c.is_ascii_digit();
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if ok_first(c) => chars.all(ok_rest),
        _ => false,
    }
}
