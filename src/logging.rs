//! Logging setup
//!
//! Console logging through `tracing-subscriber`. `RUST_LOG` overrides the
//! default filter; wgpu and naga are kept at `warn` because they log every
//! shader compilation at `info`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info,wgpu_hal=warn,wgpu_core=warn,naga=warn";

/// Builds the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(verbose: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(verbose)
        .with_thread_ids(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .try_init();

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::new(DEFAULT_FILTER);
        assert!(filter.to_string().contains("wgpu_core=warn"));
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
