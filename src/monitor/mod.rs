//! The fetch chain and the task that owns the state.
//!
//! A single `Monitor` task owns the `VpnInfo`. Triggers and fetch results
//! arrive as `Event`s on its queue, so handlers run one at a time and the
//! state needs no lock. Fetches are spawned and not tracked: a second refresh
//! started before the first chain finishes may interleave with it, and the
//! last result to arrive wins. Stale location lookups are not cancelled.

mod handle;

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::bar::BarItem;
use crate::config::{Config, EVENT_QUEUE_CAPACITY};
use crate::fetch::{fetch_url, location_url, FetchOutcome};
use crate::state::VpnInfo;

pub use handle::{MonitorClosed, MonitorHandle};

/// What asked for a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RefreshSource {
    Timer,
    Command,
}

/// Messages processed by the monitor task.
#[derive(Debug)]
pub enum Event {
    /// Start the chain with an IP lookup
    Refresh(RefreshSource),
    /// The IP lookup finished
    IpFetched(FetchOutcome),
    /// The location lookup finished
    LocationFetched(FetchOutcome),
}

/// Owns the state and drives the IP → location chain.
pub struct Monitor {
    client: reqwest::Client,
    ip_url: String,
    location_url: String,
    info: VpnInfo,
    updated_at_ms: Option<i64>,
    bar: Arc<BarItem>,
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl Monitor {
    /// Creates the monitor and a handle for sending it refresh requests.
    pub fn new(
        client: reqwest::Client,
        config: &Config,
        bar: Arc<BarItem>,
    ) -> (Self, MonitorHandle) {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let handle = MonitorHandle::new(tx.clone());
        let monitor = Self {
            client,
            ip_url: config.ip_url.clone(),
            location_url: config.location_url.clone(),
            info: VpnInfo::default(),
            updated_at_ms: None,
            bar,
            tx,
            rx,
        };
        (monitor, handle)
    }

    /// Processes events until `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                event = self.rx.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
            }
        }
        debug!("Monitor stopped");
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Refresh(source) => {
                debug!("Refresh requested by {}", source);
                self.spawn_fetch(self.ip_url.clone(), Event::IpFetched);
            }
            Event::IpFetched(outcome) => {
                let next = self.info.apply_ip_outcome(&outcome);
                if let Some(ip) = next {
                    info!("Public IP is {}", ip);
                    let url = location_url(&self.location_url, &ip);
                    self.spawn_fetch(url, Event::LocationFetched);
                } else {
                    debug!("IP lookup left ip = {}", self.info.ip);
                }
                self.touch();
            }
            Event::LocationFetched(outcome) => {
                if self.info.apply_location_outcome(&outcome) {
                    info!("Location is {}", self.info.location);
                } else {
                    debug!("Ignored location response ({})", outcome.stderr);
                }
                self.touch();
            }
        }
    }

    /// Records the update time and refreshes the bar item.
    fn touch(&mut self) {
        self.updated_at_ms = Some(chrono::Utc::now().timestamp_millis());
        self.bar.refresh(&self.info, self.updated_at_ms);
    }

    fn spawn_fetch(&self, url: String, wrap: fn(FetchOutcome) -> Event) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = fetch_url(&client, &url).await;
            if tx.send(wrap(outcome)).await.is_err() {
                debug!("Monitor gone, dropping result for {}", url);
            }
        });
    }
}

/// Runs the chain once and returns the resulting state.
///
/// Each stage is awaited in turn; no task or queue is involved.
pub async fn resolve_once(client: &reqwest::Client, config: &Config) -> VpnInfo {
    let mut info = VpnInfo::default();
    let outcome = fetch_url(client, &config.ip_url).await;
    if let Some(ip) = info.apply_ip_outcome(&outcome) {
        let outcome = fetch_url(client, &location_url(&config.location_url, &ip)).await;
        info.apply_location_outcome(&outcome);
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FetchErrorKind;

    /// A localhost port that was just released, so connections are refused.
    fn closed_port() -> u16 {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("should bind an ephemeral port");
        listener.local_addr().expect("listener has an address").port()
    }

    fn monitor() -> (Monitor, Arc<BarItem>) {
        let port = closed_port();
        let config = Config {
            ip_url: format!("http://127.0.0.1:{}/", port),
            location_url: format!("http://127.0.0.1:{}/{{ip}}/city", port),
            ..Default::default()
        };
        let bar = Arc::new(BarItem::new("vpn_status", false));
        let client = reqwest::Client::new();
        let (monitor, _handle) = Monitor::new(client, &config, Arc::clone(&bar));
        (monitor, bar)
    }

    #[tokio::test]
    async fn test_ip_error_refreshes_bar() {
        let (mut monitor, bar) = monitor();
        monitor.handle(Event::IpFetched(FetchOutcome::failure(
            FetchErrorKind::Timeout,
            "timed out",
        )));
        let frame = bar.current();
        assert_eq!(frame.line, "VPN: error");
        assert!(frame.snapshot.updated_at_ms.is_some());
    }

    #[tokio::test]
    async fn test_empty_ip_body_still_refreshes_bar() {
        let (mut monitor, bar) = monitor();
        monitor.info.ip = "198.51.100.4".to_string();
        monitor.handle(Event::IpFetched(FetchOutcome::success("")));

        let frame = bar.current();
        assert_eq!(frame.line, "VPN: 198.51.100.4");
        assert_eq!(frame.snapshot.ip, "198.51.100.4");
        assert!(frame.snapshot.updated_at_ms.is_some());
        tokio::task::yield_now().await;
        assert!(monitor.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_valid_ip_queues_location_lookup() {
        let (mut monitor, bar) = monitor();
        monitor.handle(Event::IpFetched(FetchOutcome::success("198.51.100.4\n")));
        assert_eq!(bar.current().line, "VPN: 198.51.100.4");

        // The spawned lookup fails against the closed port and reports back
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), monitor.rx.recv())
            .await
            .expect("location lookup should report back")
            .expect("queue should be open");
        match event {
            Event::LocationFetched(outcome) => assert!(outcome.is_error()),
            other => panic!("expected LocationFetched, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_ip_queues_nothing() {
        let (mut monitor, bar) = monitor();
        monitor.handle(Event::IpFetched(FetchOutcome::success("<html>oops</html>")));
        assert_eq!(bar.current().line, "VPN: VPN active");
        tokio::task::yield_now().await;
        assert!(monitor.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_location_result_refreshes_bar() {
        let (mut monitor, bar) = monitor();
        monitor.info.ip = "198.51.100.4".to_string();
        monitor.handle(Event::LocationFetched(FetchOutcome::success("Lisbon\n")));
        assert_eq!(bar.current().line, "VPN: 198.51.100.4 (Lisbon)");

        monitor.handle(Event::LocationFetched(FetchOutcome::success("<p>busy</p>")));
        assert_eq!(bar.current().line, "VPN: 198.51.100.4 (Lisbon)");
    }

    #[tokio::test]
    async fn test_resolve_once_against_closed_port() {
        let config = Config {
            ip_url: format!("http://127.0.0.1:{}/", closed_port()),
            ..Default::default()
        };
        let info = resolve_once(&reqwest::Client::new(), &config).await;
        assert_eq!(info.ip, "error");
        assert_eq!(info.location, "");
    }
}
