//! vpn_status library: public IP and location as a status-bar item
//!
//! This library polls an IP-echo service for the public address, resolves a
//! coarse location for it with a second lookup, and renders both as a single
//! bar line such as `VPN: 203.0.113.7 (Berlin)`. The line refreshes on a
//! timer and on the `/vpn` command.
//!
//! # Example
//!
//! ```no_run
//! use vpn_status::{run_check, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     color: false,
//!     ..Default::default()
//! };
//! println!("{}", run_check(config).await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod bar;
pub mod command;
pub mod config;
mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod monitor;
pub mod render;
pub mod state;
pub mod status_server;
pub mod timer;

// Re-export public API
pub use config::{Cli, Command, Config, ConfigError, LogFormat, LogLevel};
pub use error_handling::{FetchErrorKind, InitializationError};
pub use run::{run_check, run_watch};
pub use state::{VpnInfo, VpnSnapshot};

// Internal run module (wires the service together)
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::{debug, info, warn};
    use tokio::io::BufReader;
    use tokio_util::sync::CancellationToken;

    use crate::app::{shutdown_gracefully, spawn_bar_printer};
    use crate::bar::BarItem;
    use crate::command::{CommandRegistry, LoopEnd};
    use crate::config::{
        Config, BAR_ITEM_NAME, COMMAND_NAME, SCRIPT_AUTHOR, SCRIPT_DESC, SCRIPT_LICENSE,
        SCRIPT_NAME, SCRIPT_VERSION,
    };
    use crate::initialization::init_client;
    use crate::monitor::{resolve_once, Monitor};
    use crate::render::render;
    use crate::status_server::start_status_server;
    use crate::timer::spawn_refresh_timer;

    fn log_registration() {
        info!(
            "{} {} by {} ({}): {}",
            SCRIPT_NAME, SCRIPT_VERSION, SCRIPT_AUTHOR, SCRIPT_LICENSE, SCRIPT_DESC
        );
    }

    /// Runs the service until Ctrl-C, `/quit`, or (with `exit_on_eof`) the
    /// end of stdin.
    ///
    /// Every render of the bar item is printed as one line on stdout.
    /// Commands are read from stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the HTTP client
    /// cannot be created, or stdin/stdout fail. Lookup failures are never
    /// errors; they show up in the bar line.
    pub async fn run_watch(config: Config) -> Result<()> {
        config.validate().context("Invalid configuration")?;
        log_registration();

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let bar = Arc::new(BarItem::new(BAR_ITEM_NAME, config.color));
        let cancel = CancellationToken::new();
        let (monitor, handle) = Monitor::new(client, &config, Arc::clone(&bar));

        let mut tasks = vec![
            tokio::spawn(monitor.run(cancel.clone())),
            spawn_bar_printer(bar.subscribe(), cancel.clone()),
            spawn_refresh_timer(
                handle.clone(),
                Duration::from_millis(config.interval_ms),
                cancel.clone(),
            ),
        ];

        if let Some(port) = config.status_port {
            let frames = bar.subscribe();
            let cancel = cancel.clone();
            tasks.push(tokio::spawn(async move {
                if let Err(e) = start_status_server(port, frames, cancel).await {
                    warn!("{:#}", e);
                }
            }));
        }

        info!(
            "Bar item '{}' registered, refreshing every {}s; type /{} to refresh now",
            bar.name(),
            config.interval_ms / 1000,
            COMMAND_NAME
        );

        let registry = CommandRegistry::new();
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        let end = tokio::select! {
            end = registry.run_loop(stdin, &mut stdout, &handle, &cancel) => end?,
            _ = tokio::signal::ctrl_c() => LoopEnd::Cancelled,
        };

        if end == LoopEnd::Eof && !config.exit_on_eof {
            debug!("stdin closed, commands disabled until shutdown");
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl-C")?;
        }

        info!("Shutting down");
        shutdown_gracefully(cancel, tasks).await;
        Ok(())
    }

    /// Resolves the IP and location once and returns the rendered bar line.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints or timeout are invalid, or the HTTP
    /// client cannot be created. The refresh interval is not checked. A failed lookup still yields a line
    /// (`VPN: error`, `VPN: VPN active`).
    pub async fn run_check(config: Config) -> Result<String> {
        config.validate_lookup().context("Invalid configuration")?;
        log_registration();

        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let info = resolve_once(&client, &config).await;
        Ok(render(&info, config.color))
    }
}
