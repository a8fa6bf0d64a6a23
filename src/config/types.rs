//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use url::Url;

use crate::config::constants::{
    DEFAULT_IP_URL, DEFAULT_LOCATION_URL, DEFAULT_USER_AGENT, FETCH_TIMEOUT_MS, IP_PLACEHOLDER,
    MIN_REFRESH_INTERVAL_MS, REFRESH_INTERVAL_MS, SCRIPT_DESC,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Top-level command line.
///
/// # Examples
///
/// ```bash
/// # Keep the bar line updated, reading commands from stdin
/// vpn_status watch
///
/// # One lookup, print the line, exit
/// vpn_status check --no-color
///
/// # Expose the current state on http://127.0.0.1:9410/status
/// vpn_status watch --status-port 9410
/// ```
#[derive(Debug, Parser)]
#[command(name = "vpn_status", version, about = SCRIPT_DESC)]
pub struct Cli {
    /// What to run (defaults to `watch`)
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub opt: Opt,
}

/// Subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Refresh on a timer and print every re-render of the bar item
    Watch,
    /// Resolve the IP and location once, print the bar item and exit
    Check,
}

/// Options shared by all subcommands.
#[derive(Debug, Args)]
pub struct Opt {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// IP-echo service returning the public address as plain text
    #[arg(long, global = true, env = "VPN_STATUS_IP_URL", default_value = DEFAULT_IP_URL)]
    pub ip_url: String,

    /// Location lookup URL; `{ip}` is replaced with the resolved address
    #[arg(
        long,
        global = true,
        env = "VPN_STATUS_LOCATION_URL",
        default_value = DEFAULT_LOCATION_URL
    )]
    pub location_url: String,

    /// Per-fetch timeout in milliseconds
    #[arg(long, global = true, default_value_t = FETCH_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Refresh interval in milliseconds
    #[arg(long, global = true, default_value_t = REFRESH_INTERVAL_MS)]
    pub interval_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print the bar item without ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Serve `/status` and `/bar` on 127.0.0.1 at this port
    #[arg(long, global = true)]
    pub status_port: Option<u16>,

    /// Stop when stdin reaches end of file
    #[arg(long, global = true)]
    pub exit_on_eof: bool,
}

/// Configuration validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A URL that does not parse or is not http(s).
    #[error("Invalid {name} URL '{value}': {reason}")]
    InvalidUrl {
        /// Which option carried the URL
        name: &'static str,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// The location template has nowhere to put the IP.
    #[error("Location URL '{0}' must contain the {{ip}} placeholder")]
    MissingIpPlaceholder(String),

    /// A zero fetch timeout would fail every request.
    #[error("Fetch timeout must be greater than zero")]
    ZeroTimeout,

    /// Refresh interval below the accepted minimum.
    #[error(
        "Refresh interval {0}ms is below the minimum of {min}ms",
        min = MIN_REFRESH_INTERVAL_MS
    )]
    IntervalTooShort(u64),
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use vpn_status::Config;
///
/// let config = Config {
///     interval_ms: 60_000,
///     color: false,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// IP-echo service URL
    pub ip_url: String,

    /// Location lookup template containing `{ip}`
    pub location_url: String,

    /// Per-fetch timeout in milliseconds
    pub timeout_ms: u64,

    /// Refresh interval in milliseconds
    pub interval_ms: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Color the bar label
    pub color: bool,

    /// HTTP status server port (optional, disabled by default)
    pub status_port: Option<u16>,

    /// Stop the service when stdin closes
    pub exit_on_eof: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            ip_url: DEFAULT_IP_URL.to_string(),
            location_url: DEFAULT_LOCATION_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            interval_ms: REFRESH_INTERVAL_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            color: true,
            status_port: None,
            exit_on_eof: false,
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            log_level: opt.log_level,
            log_format: opt.log_format,
            ip_url: opt.ip_url,
            location_url: opt.location_url,
            timeout_ms: opt.timeout_ms,
            interval_ms: opt.interval_ms,
            user_agent: opt.user_agent,
            color: !opt.no_color,
            status_port: opt.status_port,
            exit_on_eof: opt.exit_on_eof,
        }
    }
}

impl Config {
    /// Checks everything the `watch` service uses: endpoints, fetch timeout
    /// and refresh interval.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_lookup()?;
        if self.interval_ms < MIN_REFRESH_INTERVAL_MS {
            return Err(ConfigError::IntervalTooShort(self.interval_ms));
        }
        Ok(())
    }

    /// Checks only what a single lookup pass needs: the two endpoints and
    /// the fetch timeout. The refresh interval is ignored.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    pub fn validate_lookup(&self) -> Result<(), ConfigError> {
        check_http_url("IP", &self.ip_url)?;

        if !self.location_url.contains(IP_PLACEHOLDER) {
            return Err(ConfigError::MissingIpPlaceholder(
                self.location_url.clone(),
            ));
        }
        check_http_url(
            "location",
            &self.location_url.replace(IP_PLACEHOLDER, "192.0.2.1"),
        )
        .map_err(|e| match e {
            ConfigError::InvalidUrl { name, reason, .. } => ConfigError::InvalidUrl {
                name,
                value: self.location_url.clone(),
                reason,
            },
            other => other,
        })?;

        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn check_http_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
        reason,
    };
    let parsed = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
