//! Diagnostic tracing for the wrapper.
//!
//! - **Tracing (this module)**: diagnostics on stderr, level from `RUST_LOG`
//!   or the `-v` flag.
//! - **Product output**: terraform output and tfwrap notices on stdout,
//!   unaffected by either.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "tfwrap=info,warn",
        2 => "tfwrap=debug,info",
        _ => "trace",
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `verbosity`.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=tfwrap=debug tfwrap plan
/// tfwrap -vv init --dry
/// ```
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 1)
                .compact(),
        )
        .init();
}
