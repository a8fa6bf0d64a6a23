//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, validation limits)
//! - Script metadata shown at startup and in `--help`
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Cli, Command, Config, ConfigError, LogFormat, LogLevel, Opt};
