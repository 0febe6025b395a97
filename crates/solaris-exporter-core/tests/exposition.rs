//! Registry gathering and text encoding.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use solaris_exporter_core::exposition::{encode, text::format_value, CONTENT_TYPE};
use solaris_exporter_core::{Collector, ExporterError, MetricFamily, MetricKind, Registry, Result};

struct Fixed(&'static str, MetricKind, Vec<(&'static str, f64)>);

impl Collector for Fixed {
    fn collect(&self) -> Result<Vec<MetricFamily>> {
        let mut fam = MetricFamily::new(self.0, "fixed values", self.1, &["host", "statistic"])?;
        for (stat, v) in &self.2 {
            fam.add_metric(&["box", stat], *v)?;
        }
        Ok(vec![fam])
    }
}

struct Failing;

impl Collector for Failing {
    fn collect(&self) -> Result<Vec<MetricFamily>> {
        Err(ExporterError::Collection("getloadavg unavailable".into()))
    }
}

#[test]
fn encodes_help_type_and_samples_in_order() {
    let mut reg = Registry::new();
    reg.register(Fixed("a_time", MetricKind::Counter, vec![("user", 12.5), ("idle", 3.0)]));
    reg.register(Fixed("b_load", MetricKind::Gauge, vec![("vcpu", 8.0)]));

    let body = encode(&reg.gather().unwrap());
    let expected = "\
# HELP a_time fixed values
# TYPE a_time counter
a_time{host=\"box\",statistic=\"user\"} 12.5
a_time{host=\"box\",statistic=\"idle\"} 3.0
# HELP b_load fixed values
# TYPE b_load gauge
b_load{host=\"box\",statistic=\"vcpu\"} 8.0
";
    assert_eq!(body, expected);
}

#[test]
fn failing_collector_aborts_whole_gather() {
    let mut reg = Registry::new();
    reg.register(Fixed("a_time", MetricKind::Counter, vec![("user", 1.0)]));
    reg.register(Failing);

    let err = reg.gather().expect_err("must fail");
    assert_eq!(err.code().as_str(), "COLLECTION_FAILED");
    assert_eq!(err.code().http_status(), 500);
}

#[test]
fn duplicate_family_names_are_rejected() {
    let mut reg = Registry::new();
    reg.register(Fixed("dup", MetricKind::Gauge, vec![]));
    reg.register(Fixed("dup", MetricKind::Gauge, vec![]));

    match reg.gather() {
        Err(ExporterError::DuplicateFamily(name)) => assert_eq!(name, "dup"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn label_arity_is_checked() {
    let mut fam = MetricFamily::gauge("x", "help", &["host", "statistic"]).unwrap();
    let err = fam.add_metric(&["only-host"], 1.0).expect_err("must fail");
    assert!(matches!(
        err,
        ExporterError::LabelMismatch { expected: 2, got: 1, .. }
    ));
    assert!(fam.samples().is_empty());
}

#[test]
fn invalid_names_are_rejected() {
    assert!(MetricFamily::gauge("1bad", "h", &[]).is_err());
    assert!(MetricFamily::gauge("ok_name", "h", &["__reserved"]).is_err());
    assert!(MetricFamily::gauge("ok:name", "h", &["statistic"]).is_ok());
    assert!(MetricFamily::gauge("ok", "h", &["has:colon"]).is_err());
}

#[test]
fn label_values_and_help_are_escaped() {
    let mut fam = MetricFamily::gauge("esc", "line one\nback\\slash", &["statistic"]).unwrap();
    fam.add_metric(&["say \"hi\"\n"], 1.0).unwrap();
    let body = encode(&[fam]);
    assert!(body.contains("# HELP esc line one\\nback\\\\slash\n"));
    assert!(body.contains("esc{statistic=\"say \\\"hi\\\"\\n\"} 1.0\n"));
}

#[test]
fn trailing_whitespace_in_label_value_survives_encoding() {
    let mut fam = MetricFamily::gauge("load", "h", &["statistic"]).unwrap();
    fam.add_metric(&["load5m  "], 0.25).unwrap();
    assert!(encode(&[fam]).contains("load{statistic=\"load5m  \"} 0.25\n"));
}

#[test]
fn unlabeled_sample_has_no_braces() {
    let mut fam = MetricFamily::gauge("plain", "h", &[]).unwrap();
    fam.add_metric(&[], 0.5).unwrap();
    assert!(encode(&[fam]).ends_with("\nplain 0.5\n"));
}

#[test]
fn value_formatting() {
    assert_eq!(format_value(4.0), "4.0");
    assert_eq!(format_value(0.0), "0.0");
    assert_eq!(format_value(1234.56), "1234.56");
    assert_eq!(format_value(f64::INFINITY), "+Inf");
    assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    assert_eq!(format_value(f64::NAN), "NaN");
}

#[test]
fn content_type_is_text_format_0_0_4() {
    assert!(CONTENT_TYPE.starts_with("text/plain; version=0.0.4"));
}

#[test]
fn sample_lookup_by_label() {
    let mut fam = MetricFamily::counter("t", "h", &["host", "statistic"]).unwrap();
    fam.add_metric(&["box", "user"], 1.0).unwrap();
    fam.add_metric(&["box", "nice"], 2.0).unwrap();
    let s = fam.sample_where("statistic", "nice").unwrap();
    assert_eq!(s.value, 2.0);
    assert_eq!(s.label("host"), Some("box"));
    assert!(fam.sample_where("statistic", "steal").is_none());
}
