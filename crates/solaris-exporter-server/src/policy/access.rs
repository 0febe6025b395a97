//! Single-address caller allowlist.
//!
//! The peer address comes from the connection (`ConnectInfo`), never from
//! forwarding headers. IPv4-mapped IPv6 peers compare as plain IPv4.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use solaris_exporter_core::error::{ExporterError, Result};

use crate::app_state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessGate {
    allowed: IpAddr,
}

impl AccessGate {
    pub fn new(allowed: IpAddr) -> Self {
        Self {
            allowed: allowed.to_canonical(),
        }
    }

    pub fn allowed(&self) -> IpAddr {
        self.allowed
    }

    /// Ok only for the allowed address. An unknown peer is denied.
    pub fn check(&self, peer: Option<IpAddr>) -> Result<()> {
        match peer {
            Some(ip) if ip.to_canonical() == self.allowed => Ok(()),
            Some(ip) => Err(ExporterError::AccessDenied(ip.to_string())),
            None => Err(ExporterError::AccessDenied("unknown peer".into())),
        }
    }
}

/// Axum middleware: 403 with an empty body for anyone but the allowed caller.
pub async fn enforce(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match state.access_gate().check(peer) {
        Ok(()) => next.run(req).await,
        Err(e) => {
            state.metrics().record_denied();
            tracing::debug!(error = %e, path = %req.uri().path(), "request rejected");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}
