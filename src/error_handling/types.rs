//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::{Display, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Why a fetch produced an error status.
///
/// The kind travels in the outcome's `stderr` and in the logs. The bar item
/// only ever shows the generic `error` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FetchErrorKind {
    /// The request or body read exceeded the fetch timeout
    Timeout,
    /// TCP/TLS connection could not be established
    Connect,
    /// The request could not be built or sent
    Request,
    /// The response body could not be read or decoded
    Body,
    Other,
}
