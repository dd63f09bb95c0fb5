//! Process-wide log setup shared by the storefront binaries.

/// Initialize structured logging with the default `info` level.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_DIRECTIVE);
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
