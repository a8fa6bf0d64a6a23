// Shared test helpers for starting the monitor against mock services.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use vpn_status::bar::{BarFrame, BarItem};
use vpn_status::initialization::init_client;
use vpn_status::monitor::{Monitor, MonitorHandle};
use vpn_status::Config;
use wiremock::MockServer;

/// Config pointing both lookups at `server`: `/ip` and `/{ip}/city`.
pub fn mock_config(server: &MockServer) -> Config {
    Config {
        ip_url: format!("{}/ip", server.uri()),
        location_url: format!("{}/{{ip}}/city", server.uri()),
        timeout_ms: 500,
        color: false,
        ..Default::default()
    }
}

/// A running monitor plus what tests need to drive and observe it.
#[allow(dead_code)] // Not every test file uses every field
pub struct Running {
    pub handle: MonitorHandle,
    pub frames: watch::Receiver<BarFrame>,
    pub bar: Arc<BarItem>,
    pub cancel: CancellationToken,
}

impl Drop for Running {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns the monitor task for `config`. No timer is started.
pub fn start_monitor(config: &Config) -> Running {
    let client = init_client(config).expect("client should build");
    let bar = Arc::new(BarItem::new("vpn_status", false));
    let frames = bar.subscribe();
    let cancel = CancellationToken::new();
    let (monitor, handle) = Monitor::new(client, config, Arc::clone(&bar));
    tokio::spawn(monitor.run(cancel.clone()));
    Running {
        handle,
        frames,
        bar,
        cancel,
    }
}

/// Waits up to five seconds for a frame matching `pred`.
pub async fn wait_for_frame<F>(frames: &mut watch::Receiver<BarFrame>, pred: F) -> BarFrame
where
    F: Fn(&BarFrame) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let frame = frames.borrow_and_update();
                if pred(&frame) {
                    return frame.clone();
                }
            }
            frames.changed().await.expect("bar item should stay alive");
        }
    })
    .await
    .expect("timed out waiting for bar frame")
}

/// Lets in-flight fetches land before mock expectations are verified.
#[allow(dead_code)]
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}
