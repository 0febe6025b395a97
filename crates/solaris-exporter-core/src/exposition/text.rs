//! Prometheus text exposition format, version 0.0.4.
//!
//! Per family: one `# HELP` line, one `# TYPE` line, then one line per sample
//! in insertion order. Families are written in the order given.

use std::fmt::Write;

use super::family::MetricFamily;

/// Content type served alongside encoded output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Encode families into exposition text.
pub fn encode(families: &[MetricFamily]) -> String {
    let mut out = String::new();
    for fam in families {
        write_family(fam, &mut out);
    }
    out
}

fn write_family(fam: &MetricFamily, out: &mut String) {
    let _ = writeln!(out, "# HELP {} {}", fam.name(), escape_help(fam.help()));
    let _ = writeln!(out, "# TYPE {} {}", fam.name(), fam.kind().as_str());
    for s in fam.samples() {
        if s.labels.is_empty() {
            let _ = writeln!(out, "{} {}", fam.name(), format_value(s.value));
            continue;
        }
        let label_str = s
            .labels
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(out, "{}{{{}}} {}", fam.name(), label_str, format_value(s.value));
    }
}

/// Render a sample value. Whole numbers keep a trailing `.0`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
