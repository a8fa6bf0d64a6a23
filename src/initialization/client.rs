//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client shared by the IP and location lookups.
///
/// The client carries the per-fetch timeout, so a stalled lookup reaches its
/// handler as an error status after `timeout_ms`. Connect gets the same bound.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let timeout = Duration::from_millis(config.timeout_ms);
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
