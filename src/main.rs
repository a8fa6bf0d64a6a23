//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `vpn_status` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use vpn_status::initialization::init_logger_with;
use vpn_status::{run_check, run_watch, Cli, Command, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Watch);
    let config = Config::from(cli.opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let result = match command {
        Command::Watch => run_watch(config).await,
        Command::Check => run_check(config).await.map(|line| println!("{}", line)),
    };

    match result {
        Ok(()) => {
            // A pending blocking read on stdin would otherwise hold up runtime shutdown
            process::exit(0);
        }
        Err(e) => {
            eprintln!("vpn_status error: {:#}", e);
            process::exit(1);
        }
    }
}
