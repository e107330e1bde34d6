//! Recency Cache shell
//!
//! Reads JSON requests from stdin, one per line, and writes one JSON
//! response per line to stdout. Logs go to stderr.

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recency_cache::{Config, Session};

/// Main entry point for the cache shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create a session owning a fresh cache
/// 4. Serve requests until stdin closes
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env().context("Failed to load cache configuration")?;
    info!(capacity = config.capacity, "Configuration loaded");

    let mut session = Session::from_config(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    session
        .run(stdin.lock(), stdout.lock())
        .context("Shell I/O failed")?;

    Ok(())
}
