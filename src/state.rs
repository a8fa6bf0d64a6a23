//! The IP/location snapshot behind the bar item.

use serde::Serialize;

use crate::config::{
    HTML_MARKER, IP_ERROR, IP_PENDING, IP_UNVERIFIED, MAX_IP_LEN, MAX_LOCATION_LEN,
};
use crate::fetch::FetchOutcome;

/// Current public IP and its location.
///
/// `ip` is always the pending sentinel, `error`, `VPN active`, or a value that
/// passed [`is_plausible_ip`]. `location` is empty or passed
/// [`is_plausible_location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnInfo {
    pub ip: String,
    pub location: String,
}

impl Default for VpnInfo {
    fn default() -> Self {
        Self {
            ip: IP_PENDING.to_string(),
            location: String::new(),
        }
    }
}

impl VpnInfo {
    /// Applies the result of an IP lookup.
    ///
    /// Returns the validated IP when a location lookup should follow.
    /// An empty successful body leaves the state untouched.
    pub fn apply_ip_outcome(&mut self, outcome: &FetchOutcome) -> Option<String> {
        if outcome.is_error() {
            self.ip = IP_ERROR.to_string();
            return None;
        }
        if outcome.stdout.is_empty() {
            return None;
        }

        let ip = outcome.stdout.trim();
        if is_plausible_ip(ip) {
            self.ip = ip.to_string();
            Some(self.ip.clone())
        } else {
            self.ip = IP_UNVERIFIED.to_string();
            None
        }
    }

    /// Applies the result of a location lookup. Never clears a known location.
    ///
    /// Returns whether the location was replaced.
    pub fn apply_location_outcome(&mut self, outcome: &FetchOutcome) -> bool {
        if !is_plausible_location(&outcome.stdout) {
            return false;
        }
        self.location = outcome.stdout.trim().to_string();
        true
    }
}

/// Heuristic check on an IP-echo body (already trimmed).
///
/// Accepts any short dotted body without HTML. Not an address parse; IPv6
/// answers are rejected because they carry no dot.
pub fn is_plausible_ip(ip: &str) -> bool {
    !ip.is_empty()
        && ip.contains('.')
        && ip.chars().count() < MAX_IP_LEN
        && !ip.contains(HTML_MARKER)
}

/// Check on a raw location body.
///
/// A body that trims to nothing is rejected, so a known location is never
/// replaced by an empty one.
pub fn is_plausible_location(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty()
        && !raw.contains(HTML_MARKER)
        && trimmed.chars().count() < MAX_LOCATION_LEN
}

/// Serializable view of the state, published to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpnSnapshot {
    pub ip: String,
    pub location: String,
    /// Rendered bar text without colors
    pub text: String,
    /// Epoch milliseconds of the last completed lookup
    pub updated_at_ms: Option<i64>,
}
