//! Error categorization.

use super::types::FetchErrorKind;

/// Categorizes a `reqwest::Error` into a `FetchErrorKind`.
///
/// Timeouts are checked first because reqwest also flags a timed-out connect
/// as a connect error, and the timeout is the more useful answer.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchErrorKind {
    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else if error.is_body() || error.is_decode() {
        FetchErrorKind::Body
    } else if error.is_builder() || error.is_request() || error.is_redirect() {
        FetchErrorKind::Request
    } else {
        FetchErrorKind::Other
    }
}
