//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory Specification conventions over OS-specific
//! locations so the config file lives in the same place on every platform.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for hlpr.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/hlpr` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/hlpr` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join("hlpr")),
        _ => Ok(home_dir()?.join(".config").join("hlpr")),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_default() {
        // Clear XDG_CONFIG_HOME to test default behavior
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        let dir = config_dir().unwrap();
        assert!(dir.ends_with(".config/hlpr"));

        // Restore
        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", "/custom/config") };

        let dir = config_dir().unwrap();
        assert_eq!(dir, PathBuf::from("/custom/config/hlpr"));

        // Restore
        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
        }
    }
}
