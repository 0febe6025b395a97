//! HTTP endpoints.
//!
//! - `/metrics`          : CPU scrape, Prometheus text format
//! - `/metrics/exporter` : the exporter's own metrics
//! - `/healthz`          : liveness

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use solaris_exporter_core::error::ExporterError;
use solaris_exporter_core::exposition::{encode, CONTENT_TYPE};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let coordinator = state.coordinator().clone();
    let started = Instant::now();

    let res = tokio::task::spawn_blocking(move || coordinator.scrape())
        .await
        .unwrap_or_else(|e| Err(ExporterError::Internal(format!("scrape worker failed: {e}"))));

    state.metrics().record_scrape(res.is_ok());
    match res {
        Ok(body) => {
            tracing::debug!(elapsed_us = started.elapsed().as_micros() as u64, "scrape served");
            exposition_response(body)
        }
        Err(e) => {
            tracing::warn!(error = %e, code = e.code().as_str(), "scrape failed");
            error_response(&e)
        }
    }
}

pub async fn exporter_metrics(State(state): State<AppState>) -> Response {
    match state.metrics().families() {
        Ok(families) => exposition_response(encode(&families)),
        Err(e) => {
            tracing::warn!(error = %e, "exporter metrics render failed");
            error_response(&e)
        }
    }
}

fn exposition_response(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

/// Status from the error code with a short generic body. Access denials never
/// get here; the gate answers them before routing.
fn error_response(e: &ExporterError) -> Response {
    let status =
        StatusCode::from_u16(e.code().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, "scrape failed\n").into_response()
}
