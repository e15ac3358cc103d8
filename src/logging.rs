//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so stdout stays clean for results. `RUST_LOG` takes
//! precedence over the `-v` count.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Maps the number of `-v` flags to a filter directive for this crate.
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "anypdf_cli=warn",
        1 => "anypdf_cli=info",
        2 => "anypdf_cli=debug",
        _ => "anypdf_cli=trace",
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(verbosity: u8, no_color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!no_color)
                .with_target(false),
        )
        .try_init();
}
