//! HTTP status server for bars that poll instead of reading stdout.
//!
//! Provides two endpoints:
//! - `/status` - JSON snapshot of the current state
//! - `/bar` - the rendered bar line as plain text
//!
//! The server runs in the background and stops with the rest of the service.

mod handlers;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::bar::BarFrame;
use handlers::{bar_handler, status_handler};

/// Builds the router over the bar item's frames.
pub fn router(frames: watch::Receiver<BarFrame>) -> Router {
    Router::new()
        .route("/status", get(status_handler))
        .route("/bar", get(bar_handler))
        .with_state(frames)
}

/// Binds `127.0.0.1:port` and serves until `cancel` fires.
pub async fn start_status_server(
    port: u16,
    frames: watch::Receiver<BarFrame>,
    cancel: CancellationToken,
) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind status server to port {}: {}", port, e))?;

    log::info!("Status server listening on http://127.0.0.1:{}/", port);
    log::info!("  - Status: http://127.0.0.1:{}/status", port);
    log::info!("  - Bar: http://127.0.0.1:{}/bar", port);

    serve(listener, frames, cancel).await
}

/// Serves on an already bound listener until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    frames: watch::Receiver<BarFrame>,
    cancel: CancellationToken,
) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(frames))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Status server error: {}", e))
}
