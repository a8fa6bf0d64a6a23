//! Non-blocking URL fetches.
//!
//! Each fetch resolves to a `FetchOutcome`: a status, the captured body as
//! `stdout` and a diagnostic as `stderr`. Transport failures become an error
//! status. An HTTP error status does not: its body is passed through and the
//! result handlers reject HTML error pages themselves.

use log::{debug, warn};

use crate::config::IP_PLACEHOLDER;
use crate::error_handling::{categorize_reqwest_error, FetchErrorKind};

/// Completion status of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// A response was received (any HTTP status)
    Ok,
    /// Timeout, connection failure or unreadable body
    Error,
}

/// What a finished fetch hands to its result handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub status: FetchStatus,
    /// Response body
    pub stdout: String,
    /// Diagnostic text, empty on a clean 2xx
    pub stderr: String,
}

impl FetchOutcome {
    pub fn success(body: impl Into<String>) -> Self {
        Self {
            status: FetchStatus::Ok,
            stdout: body.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(kind: FetchErrorKind, detail: impl std::fmt::Display) -> Self {
        Self {
            status: FetchStatus::Error,
            stdout: String::new(),
            stderr: format!("{}: {}", kind, detail),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }
}

/// Fetches `url` with a plain GET and captures the body as text.
///
/// The timeout is the one configured on `client`.
pub async fn fetch_url(client: &reqwest::Client, url: &str) -> FetchOutcome {
    debug!("Fetching {}", url);

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let kind = categorize_reqwest_error(&e);
            warn!("Fetch of {} failed ({}): {}", url, kind, e);
            return FetchOutcome::failure(kind, e);
        }
    };

    let status = response.status();
    match response.text().await {
        Ok(body) => {
            debug!("Fetched {} -> {} ({} bytes)", url, status, body.len());
            let mut outcome = FetchOutcome::success(body);
            if !status.is_success() {
                outcome.stderr = format!("HTTP {}", status);
            }
            outcome
        }
        Err(e) => {
            let kind = categorize_reqwest_error(&e);
            warn!("Reading body of {} failed ({}): {}", url, kind, e);
            FetchOutcome::failure(kind, e)
        }
    }
}

/// Builds the location lookup URL for `ip` from a template containing `{ip}`.
pub fn location_url(template: &str, ip: &str) -> String {
    template.replace(IP_PLACEHOLDER, ip)
}
