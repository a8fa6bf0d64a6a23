//! Error handling.
//!
//! This module provides:
//! - Error type definitions for startup failures
//! - Fetch failure kinds and their extraction from `reqwest` errors
//!
//! Fetch failures never escape the monitor. They are folded into the bar
//! item as a degraded value and only the kind is kept for logging.

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{FetchErrorKind, InitializationError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_fetch_error_kind_display_is_snake_case() {
        let names: Vec<String> = FetchErrorKind::iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["timeout", "connect", "request", "body", "other"]);
    }

    #[test]
    fn test_categorize_builder_error_as_request() {
        // An unparseable URL fails while building the request
        let error = reqwest::Client::new()
            .get("not a url")
            .build()
            .expect_err("building a request for an invalid URL should fail");
        assert_eq!(categorize_reqwest_error(&error), FetchErrorKind::Request);
    }

    #[tokio::test]
    async fn test_categorize_refused_connection() {
        // Bind and release an ephemeral port so nothing is listening on it
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .expect("should bind an ephemeral port")
            .local_addr()
            .expect("listener has an address")
            .port();
        let error = reqwest::Client::new()
            .get(format!("http://127.0.0.1:{}/", port))
            .send()
            .await
            .expect_err("nothing should listen on a released port");
        assert_eq!(categorize_reqwest_error(&error), FetchErrorKind::Connect);
    }
}
