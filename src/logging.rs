// src/logging.rs
// =============================================================================
// Diagnostics go through `tracing` and are written to stderr, so stdout only
// ever carries activity lines.
//
// RUST_LOG wins when set; otherwise we log warnings, or everything down to
// debug with --verbose.
// =============================================================================

use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
