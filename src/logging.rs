//! Log output for the binaries, powered by tracing-subscriber. The level is
//! taken from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
