//! Main application modules.
//!
//! This module provides the stdout bar printer and shutdown handling used by
//! the `watch` service.

pub mod output;
pub mod shutdown;

// Re-export public API
pub use output::spawn_bar_printer;
pub use shutdown::shutdown_gracefully;
