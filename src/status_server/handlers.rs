//! Request handlers.

use axum::extract::State;
use axum::Json;
use tokio::sync::watch;

use crate::bar::BarFrame;
use crate::state::VpnSnapshot;

/// JSON snapshot of the current state.
pub async fn status_handler(State(frames): State<watch::Receiver<BarFrame>>) -> Json<VpnSnapshot> {
    Json(frames.borrow().snapshot.clone())
}

/// Uncolored bar line.
pub async fn bar_handler(State(frames): State<watch::Receiver<BarFrame>>) -> String {
    frames.borrow().snapshot.text.clone()
}
