//! Subscriber initialization.
//!
//! Logs are JSON lines on stderr so stdout stays free for command output.
//! `RUST_LOG` overrides the directive passed in.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "info";

/// Build the level filter: `RUST_LOG` if it parses, otherwise `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber.
///
/// Returns `false` when one was already installed.
pub fn init(fallback: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
