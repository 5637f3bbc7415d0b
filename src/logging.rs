//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events. The CLI and the JNI `JNI_OnLoad`
//! hook install a formatting subscriber that writes to stderr, which
//! Android forwards to logcat.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info` when `verbose`
/// and `warn` when not. Calling this more than once is harmless: only the
/// first subscriber is kept.
pub fn init(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(verbose, "logging initialized");
    }
}
