//! Listener setup: rustls unless the config explicitly disables TLS.

use std::net::SocketAddr;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use solaris_exporter_core::error::{ExporterError, Result};

use crate::{app_state::AppState, config::TlsSection, router};

/// Load the PEM cert/key pair. `None` only when `tls.disabled` is set.
pub async fn load_tls(tls: &TlsSection) -> Result<Option<RustlsConfig>> {
    let Some((cert, key)) = tls.pem_paths() else {
        return Ok(None);
    };
    RustlsConfig::from_pem_file(cert, key)
        .await
        .map(Some)
        .map_err(|e| ExporterError::InvalidConfig(format!("load tls cert/key ({cert}, {key}): {e}")))
}

/// Bind and serve until `handle` shuts the server down.
pub async fn serve(state: AppState, handle: Handle) -> Result<()> {
    let listen = state.cfg().exporter.listen_addr()?;
    let tls = load_tls(&state.cfg().tls).await?;
    let app = router::build_router(state.clone())
        .into_make_service_with_connect_info::<SocketAddr>();

    tracing::info!(
        %listen,
        host = %state.host(),
        allowed_caller = %state.access_gate().allowed(),
        tls = tls.is_some(),
        "solaris-exporter starting"
    );

    let served = match tls {
        Some(rustls) => {
            axum_server::bind_rustls(listen, rustls)
                .handle(handle)
                .serve(app)
                .await
        }
        None => {
            tracing::warn!("tls.disabled is set; serving plaintext http");
            axum_server::bind(listen).handle(handle).serve(app).await
        }
    };
    served.map_err(|e| ExporterError::Internal(format!("server failed: {e}")))
}
