// src/logging.rs
// =============================================================================
// Sets up tracing output.
//
// main() calls init_logging() once, before doing anything else. RUST_LOG
// wins when it is set; otherwise --verbose picks debug and the default is
// info. Logs go to stderr so command output on stdout stays clean.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
