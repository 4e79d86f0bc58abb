//! Tracing setup for the assembler binary.
//!
//! Progress lines meant for the operator are printed to stdout by
//! [`crate::assemble`] and are unaffected by `RUST_LOG`. Tracing is for
//! diagnosing subprocess calls and copies, and goes to stderr.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=assembler=debug assembler --root playground
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
