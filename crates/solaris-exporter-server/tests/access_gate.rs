//! Caller allowlist, in isolation and in front of the router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod support;

use std::net::IpAddr;

use axum::http::Method;
use solaris_exporter_server::policy::AccessGate;
use support::{app_with, send, ScriptedSampler, ALLOWED};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

#[test]
fn gate_matches_only_the_allowed_address() {
    let gate = AccessGate::new(ip(ALLOWED));
    assert!(gate.check(Some(ip("10.20.30.40"))).is_ok());
    assert!(gate.check(Some(ip("10.20.30.41"))).is_err());
    assert!(gate.check(Some(ip("203.0.113.5"))).is_err());

    let err = gate.check(Some(ip("203.0.113.5"))).unwrap_err();
    assert_eq!(err.code().as_str(), "FORBIDDEN");
    assert_eq!(err.code().http_status(), 403);
}

#[test]
fn gate_treats_v4_mapped_v6_as_v4() {
    let gate = AccessGate::new(ip(ALLOWED));
    assert!(gate.check(Some(ip("::ffff:10.20.30.40"))).is_ok());
    assert!(gate.check(Some(ip("::ffff:10.20.30.41"))).is_err());

    let v6_configured = AccessGate::new(ip("::ffff:10.20.30.40"));
    assert_eq!(v6_configured.allowed(), ip("10.20.30.40"));
}

#[test]
fn gate_denies_unknown_peer() {
    let gate = AccessGate::new(ip(ALLOWED));
    assert!(gate.check(None).is_err());
}

#[tokio::test]
async fn foreign_caller_gets_403_with_empty_body() {
    let (state, app) = app_with(ScriptedSampler::healthy());

    let r = send(&app, Some("203.0.113.5"), Method::GET, "/metrics").await;
    assert_eq!(r.status, 403);
    assert!(r.body.is_empty());
    assert_eq!(state.metrics().scrapes.get(&[("outcome", "ok")]), 0);
}

#[tokio::test]
async fn foreign_caller_gets_403_regardless_of_method_or_path() {
    let (state, app) = app_with(ScriptedSampler::healthy());

    for (method, path) in [
        (Method::GET, "/metrics"),
        (Method::POST, "/metrics"),
        (Method::GET, "/healthz"),
        (Method::GET, "/metrics/exporter"),
        (Method::DELETE, "/does-not-exist"),
    ] {
        let r = send(&app, Some("203.0.113.5"), method.clone(), path).await;
        assert_eq!(r.status, 403, "{method} {path}");
        assert!(r.body.is_empty(), "{method} {path}");
    }
    assert_eq!(
        state
            .metrics()
            .access_denied
            .load(std::sync::atomic::Ordering::Relaxed),
        5
    );
}

#[tokio::test]
async fn request_without_peer_address_is_denied() {
    let (_state, app) = app_with(ScriptedSampler::healthy());
    let r = send(&app, None, Method::GET, "/metrics").await;
    assert_eq!(r.status, 403);
    assert!(r.body.is_empty());
}

#[tokio::test]
async fn allowed_caller_reaches_handlers() {
    let (_state, app) = app_with(ScriptedSampler::healthy());

    let r = send(&app, Some(ALLOWED), Method::GET, "/healthz").await;
    assert_eq!(r.status, 200);
    assert_eq!(r.body, "ok");

    let r = send(&app, Some(ALLOWED), Method::GET, "/nope").await;
    assert_eq!(r.status, 404);

    let r = send(&app, Some(ALLOWED), Method::POST, "/metrics").await;
    assert_eq!(r.status, 405);
}
