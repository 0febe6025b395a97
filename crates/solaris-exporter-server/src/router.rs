//! Axum router wiring.
//!
//! The access gate is a router-wide layer, so it also covers unmatched paths
//! and wrong methods: a foreign caller always sees 403.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, ops, policy};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/metrics/exporter", get(ops::exporter_metrics))
        .route("/healthz", get(ops::healthz))
        .layer(middleware::from_fn_with_state(state.clone(), policy::enforce))
        .with_state(state)
}
