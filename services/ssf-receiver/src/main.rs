//! SSF Receiver - Main Entry Point
//!
//! Accepts pushed CAEP SETs, simulates policy decisions, and serves a live
//! dashboard of recent events.

use anyhow::Context;
use rust_common::init_tracing;
use ssf_receiver::shutdown::{serve_with_shutdown, wait_for_signal};
use ssf_receiver::{AppState, Config, router};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.tracing_config())?;

    info!("Starting SSF Receiver");

    let addr = config.socket_addr()?;
    let app = router(AppState::new(&config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        issuer = config.receiver_issuer_str(),
        "SSF Receiver listening; dashboard at http://{addr}/"
    );

    serve_with_shutdown(listener, app, wait_for_signal(), config.shutdown_timeout()).await?;

    info!("SSF Receiver stopped");
    Ok(())
}
