//! Configuration file management.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, HlprConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
