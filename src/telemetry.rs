//! Logging setup for the `barchart` binary and embedding applications.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the host. `init_default_tracing` is the convenience used by the CLI.

use tracing_subscriber::EnvFilter;

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, falling back
/// to `default_level` when the variable is unset or invalid.
///
/// Returns `false` if a global subscriber was already set.
pub fn init_default_tracing(default_level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let _ = init_default_tracing("warn");
        assert!(!init_default_tracing("debug"));
    }
}
