//! Global output configuration and utilities.
//!
//! This module provides centralized control over CLI output behavior,
//! including quiet mode and color support.
//!
//! ## Design Principles
//!
//! - Model replies, usage statistics and the session banner go to stdout
//! - Status messages, progress and diagnostics go to stderr
//! - Errors always go to stderr
//! - Quiet mode suppresses non-essential output
//! - Colors can be disabled via flag or NO_COLOR environment variable

use std::sync::OnceLock;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // Check NO_COLOR environment variable (https://no-color.org/)
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }
}

impl OutputConfig {
    /// Builds the configuration from CLI flags, honoring `NO_COLOR` as well.
    pub fn from_flags(quiet: bool, no_color: bool) -> Self {
        let defaults = Self::default();
        Self {
            quiet,
            no_color: no_color || defaults.no_color,
        }
    }
}

/// Initialize the global output configuration.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
///
/// Use this for progress indicators, informational messages, etc.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default() {
        // Note: This test may be affected by NO_COLOR env var in test environment
        let config = OutputConfig::default();
        assert!(!config.quiet);
    }

    #[test]
    fn test_from_flags_no_color_flag_wins() {
        let config = OutputConfig::from_flags(true, true);
        assert!(config.quiet);
        assert!(config.no_color);
    }

    #[test]
    fn test_is_quiet_default() {
        // Without initialization, should use default (not quiet)
        let config = OutputConfig::default();
        assert!(!config.quiet);
    }
}
