//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` takes precedence;
//! otherwise `--verbose` selects debug level for this crate.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "hlpr=warn";
const VERBOSE_FILTER: &str = "hlpr=debug";

const fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
