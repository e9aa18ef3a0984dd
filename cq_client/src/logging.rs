//! File logging for the client.
//!
//! The terminal belongs to the TUI, so records go to a file. Library
//! records emitted through the `log` facade are bridged into the same
//! subscriber.

use anyhow::{Context, Result};
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

/// Initialize logging to `path`, appending to any existing file.
///
/// Log levels are configurable via the `RUST_LOG` env var.
///
/// # Example
///
/// ```no_run
/// use cq_client::logging;
///
/// logging::init(std::path::Path::new("country_quiz.log")).unwrap();
/// tracing::info!("Client starting");
/// ```
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!("Logging to {}", path.display());
    Ok(())
}
