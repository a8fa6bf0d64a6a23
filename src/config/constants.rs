//! Configuration constants.
//!
//! This module defines the constants used throughout the application: the
//! default endpoints, fetch timing, and the limits applied when validating
//! response bodies.

// Script metadata
pub const SCRIPT_NAME: &str = "vpn_status";
pub const SCRIPT_AUTHOR: &str = "Secure IRC";
pub const SCRIPT_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCRIPT_LICENSE: &str = "MIT";
pub const SCRIPT_DESC: &str = "Shows VPN status in the status bar";

/// Name of the status-bar item.
pub const BAR_ITEM_NAME: &str = "vpn_status";
/// Name of the manual refresh command.
pub const COMMAND_NAME: &str = "vpn";

// Endpoints
/// IP-echo service; the body is the caller's public IP as plain text.
pub const DEFAULT_IP_URL: &str = "https://api.ipify.org";
/// IP-to-city lookup. `{ip}` is replaced with the address being resolved.
pub const DEFAULT_LOCATION_URL: &str = "https://ipinfo.io/{ip}/city";
/// Placeholder substituted in the location URL template.
pub const IP_PLACEHOLDER: &str = "{ip}";

// Timing
/// Per-fetch timeout in milliseconds
pub const FETCH_TIMEOUT_MS: u64 = 5000;
/// Refresh interval in milliseconds (5 minutes)
pub const REFRESH_INTERVAL_MS: u64 = 300_000;
/// Lowest accepted refresh interval in milliseconds
pub const MIN_REFRESH_INTERVAL_MS: u64 = 1000;

// Response validation
/// An IP body must be strictly shorter than this (in characters)
pub const MAX_IP_LEN: usize = 20;
/// A location body must be strictly shorter than this after trimming
pub const MAX_LOCATION_LEN: usize = 50;
/// Marks an HTML page served in place of the expected plain-text body
pub const HTML_MARKER: char = '<';

// Display values
/// Shown before the first IP lookup completes
pub const IP_PENDING: &str = "...";
/// Shown when the IP lookup failed at the transport level
pub const IP_ERROR: &str = "error";
/// Shown when the IP service answered with something that is not an address
pub const IP_UNVERIFIED: &str = "VPN active";
/// Label at the start of the bar item
pub const BAR_LABEL: &str = "VPN:";
/// Printed to the invoking context when the refresh command runs
pub const REFRESH_ACK: &str = "VPN status refreshing...";

/// Default User-Agent string for HTTP requests.
pub const DEFAULT_USER_AGENT: &str = concat!("vpn_status/", env!("CARGO_PKG_VERSION"));

/// Capacity of the monitor event queue
pub const EVENT_QUEUE_CAPACITY: usize = 64;
