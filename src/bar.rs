//! The `vpn_status` bar item.
//!
//! A refresh re-renders the state and publishes it on a `watch` channel.
//! Observers (the stdout printer, the status server) always see the latest
//! frame; intermediate frames may be skipped.

use tokio::sync::watch;

use crate::render::render;
use crate::state::{VpnInfo, VpnSnapshot};

/// One published render of the bar item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarFrame {
    /// Display line, colored when the item was created with colors
    pub line: String,
    pub snapshot: VpnSnapshot,
}

/// A named status-bar widget.
#[derive(Debug)]
pub struct BarItem {
    name: &'static str,
    color: bool,
    tx: watch::Sender<BarFrame>,
}

impl BarItem {
    /// Creates the item showing the initial (pending) state.
    pub fn new(name: &'static str, color: bool) -> Self {
        let initial = frame(&VpnInfo::default(), None, color);
        let (tx, _rx) = watch::channel(initial);
        Self { name, color, tx }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe(&self) -> watch::Receiver<BarFrame> {
        self.tx.subscribe()
    }

    /// Latest published frame.
    pub fn current(&self) -> BarFrame {
        self.tx.borrow().clone()
    }

    /// Re-renders `info` and publishes the result.
    pub fn refresh(&self, info: &VpnInfo, updated_at_ms: Option<i64>) {
        let next = frame(info, updated_at_ms, self.color);
        log::trace!("Bar item {} -> {}", self.name, next.snapshot.text);
        // send_replace publishes even while nobody is subscribed
        self.tx.send_replace(next);
    }
}

fn frame(info: &VpnInfo, updated_at_ms: Option<i64>, color: bool) -> BarFrame {
    let text = render(info, false);
    let line = if color { render(info, true) } else { text.clone() };
    BarFrame {
        line,
        snapshot: VpnSnapshot {
            ip: info.ip.clone(),
            location: info.location.clone(),
            text,
            updated_at_ms,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_shows_pending() {
        let bar = BarItem::new("vpn_status", false);
        let frame = bar.current();
        assert_eq!(frame.line, "VPN: ...");
        assert_eq!(frame.snapshot.ip, "...");
        assert!(frame.snapshot.updated_at_ms.is_none());
    }

    #[test]
    fn test_refresh_publishes_to_subscribers() {
        let bar = BarItem::new("vpn_status", false);
        let mut rx = bar.subscribe();
        let info = VpnInfo {
            ip: "1.2.3.4".to_string(),
            location: "Berlin".to_string(),
        };
        bar.refresh(&info, Some(42));

        assert!(rx.has_changed().unwrap_or(false));
        let frame = rx.borrow_and_update().clone();
        assert_eq!(frame.line, "VPN: 1.2.3.4 (Berlin)");
        assert_eq!(frame.snapshot.updated_at_ms, Some(42));
    }

    #[test]
    fn test_snapshot_text_is_never_colored() {
        let bar = BarItem::new("vpn_status", true);
        let info = VpnInfo {
            ip: "1.2.3.4".to_string(),
            location: String::new(),
        };
        bar.refresh(&info, None);
        assert_eq!(bar.current().snapshot.text, "VPN: 1.2.3.4");
    }
}
