//! solaris-exporter server
//!
//! - Endpoint: GET /metrics (host CPU time, load, vcpu count)
//! - One allowed caller address; everyone else gets 403
//! - TLS via rustls; plaintext only with `tls.disabled: true`
//! - Graceful shutdown on Ctrl-C

use std::time::Duration;

use axum_server::Handle;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use solaris_exporter_core::error::Result;
use solaris_exporter_server::{app_state, config, serve};

#[derive(Debug, Parser)]
#[command(name = "solaris-exporter", about = "Prometheus exporter for host CPU statistics")]
struct Cli {
    /// Path to the YAML config file.
    #[arg(long, default_value = "solaris-exporter.yaml")]
    config: String,
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run(Cli::parse()).await {
        tracing::error!(error = %e, code = e.code().as_str(), "solaris-exporter failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_from_file(&cli.config)?;
    let state = app_state::AppState::new(cfg)?;

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    serve::serve(state, handle).await
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
        handle.graceful_shutdown(Some(Duration::from_secs(5)));
    }
}
