//! Sending side of the monitor queue.

use thiserror::Error;
use tokio::sync::mpsc;

use super::{Event, RefreshSource};

/// The monitor task has stopped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Monitor is no longer running")]
pub struct MonitorClosed;

/// Cheap, cloneable handle used by the timer and the command reader.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    tx: mpsc::Sender<Event>,
}

impl MonitorHandle {
    pub(crate) fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }

    /// Queues a refresh, which starts one IP lookup.
    pub async fn refresh(&self, source: RefreshSource) -> Result<(), MonitorClosed> {
        self.tx
            .send(Event::Refresh(source))
            .await
            .map_err(|_| MonitorClosed)
    }
}
