//! Scripted host sampler and app builders shared by server tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use solaris_exporter_core::error::{ExporterError, Result};
use solaris_exporter_server::{
    app_state::AppState,
    config::{self, ExporterConfig},
    host::HostIdentity,
    sampler::{CpuSampler, CpuTimes, LoadAverage},
    router,
};

pub const ALLOWED: &str = "10.20.30.40";
pub const HOST: &str = "testhost";

pub struct ScriptedSampler {
    pub times: CpuTimes,
    /// `None` simulates a failing `getloadavg`.
    pub load: Option<LoadAverage>,
    pub cores: usize,
    pub panic_on_times: bool,
}

impl ScriptedSampler {
    pub fn healthy() -> Self {
        Self {
            times: CpuTimes {
                user: 1234.5,
                system: 321.25,
                idle: 99999.0,
                nice: 0.0,
            },
            load: Some(LoadAverage {
                one: 0.5,
                five: 0.75,
                fifteen: 1.0,
            }),
            cores: 8,
            panic_on_times: false,
        }
    }

    pub fn failing_load() -> Self {
        Self {
            load: None,
            ..Self::healthy()
        }
    }
}

impl CpuSampler for ScriptedSampler {
    fn cpu_times(&self) -> Result<CpuTimes> {
        if self.panic_on_times {
            panic!("cpu times sampler exploded");
        }
        Ok(self.times)
    }

    fn load_average(&self) -> Result<LoadAverage> {
        self.load
            .ok_or_else(|| ExporterError::Collection("getloadavg failed (simulated)".into()))
    }

    fn per_cpu_usage(&self) -> Result<Vec<f32>> {
        Ok(vec![0.0; self.cores])
    }
}

pub fn config(allowed: &str) -> ExporterConfig {
    config::load_from_str(&format!(
        "version: 1\nexporter:\n  allowed_caller: \"{allowed}\"\ntls:\n  disabled: true\n"
    ))
    .unwrap()
}

pub fn state_with(sampler: ScriptedSampler) -> AppState {
    AppState::with_sampler(config(ALLOWED), HostIdentity::new(HOST), Arc::new(sampler)).unwrap()
}

pub fn app_with(sampler: ScriptedSampler) -> (AppState, Router) {
    let state = state_with(sampler);
    let app = router::build_router(state.clone());
    (state, app)
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Drive one request through the router as if it came from `peer`.
pub async fn send(app: &Router, peer: Option<&str>, method: Method, path: &str) -> Reply {
    let mut req = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    if let Some(peer) = peer {
        let ip: IpAddr = peer.parse().unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::new(ip, 40123)));
    }

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Names on `# TYPE` lines, in order.
pub fn family_names(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|l| l.strip_prefix("# TYPE "))
        .filter_map(|l| l.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
