// src/logging.rs
// =============================================================================
// Diagnostic logging via `tracing`.
//
// Logs go to stderr and are quiet by default (warn). Use RUST_LOG to see
// more, e.g. RUST_LOG=site_validator=debug shows every probe, fetch and
// validator round-trip.
//
// The [OK] / [ERROR] lines are the program's actual output and are written
// directly, never through this logger.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // try_init: a subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
