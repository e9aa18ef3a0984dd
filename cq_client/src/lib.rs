//! Internal modules for the country quiz client.
//!
//! This library provides the tokio countdown, the canvas map renderer and
//! the TUI used by the cq_client binary.

pub mod countdown;
pub mod logging;
pub mod map;
pub mod tui_app;
