//! Graceful Shutdown Module
//!
//! Runs the axum server until a shutdown trigger fires, then gives in-flight
//! requests a bounded window to finish.

use crate::error::ReceiverError;
use axum::Router;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Waits for SIGTERM or SIGINT.
///
/// A handler that cannot be installed is logged and never fires, so the
/// other one still can.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}

/// Serve `app` on `listener` until `trigger` completes.
///
/// After the trigger, the listener stops accepting and open connections get
/// `timeout` to drain before the server task is aborted.
///
/// # Errors
///
/// Returns [`ReceiverError::Platform`] if the server fails before shutdown.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    trigger: F,
    timeout: Duration,
) -> Result<(), ReceiverError>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = stop_rx.changed().await;
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut server => {
            return match joined {
                Ok(Ok(())) => {
                    info!("Server stopped normally");
                    Ok(())
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Server error");
                    Err(e.into())
                }
                Err(e) => Err(rust_common::PlatformError::internal(e.to_string()).into()),
            };
        }
        () = trigger => {
            info!("Shutdown signal received");
        }
    }

    let _ = stop_tx.send(true);

    match tokio::time::timeout(timeout, &mut server).await {
        Ok(Ok(Ok(()))) => info!("All connections drained"),
        Ok(Ok(Err(e))) => warn!(error = %e, "Server error during shutdown"),
        Ok(Err(e)) => warn!(error = %e, "Server task failed during shutdown"),
        Err(_) => {
            warn!(?timeout, "Shutdown timeout reached, aborting remaining connections");
            server.abort();
        }
    }

    info!("Shutdown complete");
    Ok(())
}
