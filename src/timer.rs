//! Periodic refresh.

use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::monitor::{MonitorHandle, RefreshSource};

/// Spawns a task that requests a refresh every `period`.
///
/// The first tick fires immediately and serves as the initial lookup.
/// The task ends when `cancel` fires or the monitor stops.
pub fn spawn_refresh_timer(
    handle: MonitorHandle,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        // A laptop waking from sleep gets one refresh, not a burst
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if handle.refresh(RefreshSource::Timer).await.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("Refresh timer stopped");
    })
}
