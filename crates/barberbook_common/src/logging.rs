//! Logging utilities for the Barberbook application.
//!
//! Provides a single place to initialize the tracing subscriber so every
//! binary and test harness logs the same way.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at the default level (INFO).
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Respects `RUST_LOG` directives from the environment and adds a default
/// directive for this workspace's crates. Safe to call more than once; later
/// calls are no-ops.
pub fn init_with_level(level: Level) {
    let filter = match format!("barberbook={}", level).parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    // try_init so tests that each call init() do not panic on the second call
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}
