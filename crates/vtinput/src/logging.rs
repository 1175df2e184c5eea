//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Returns `false` if a global subscriber was already installed; calling this
/// more than once is harmless.
pub fn init() -> bool {
    init_with_default("info")
}

/// Like [`init`], with a custom filter used when `RUST_LOG` is unset.
pub fn init_with_default(directives: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)),
        )
        .try_init()
        .is_ok()
}
