use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::completion::DEFAULT_INSTRUCTIONS;
use crate::models::Model;
use crate::paths;

/// Base URL used when neither the CLI nor the config file names one.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Environment variable consulted for the API key by default.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default settings in the `[hlpr]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HlprConfig {
    /// Default model name.
    pub model: Option<String>,
    /// Show token usage statistics after each reply.
    pub stats: Option<bool>,
    /// Enable the hosted web search tool.
    pub web: Option<bool>,
    /// API base URL.
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,
    /// Instructions sent with every request.
    pub instructions: Option<String>,
}

impl HlprConfig {
    /// Gets the API key, preferring the environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(self.api_key_env_name())
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// The environment variable that holds the API key.
    pub fn api_key_env_name(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/hlpr/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub hlpr: HlprConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The model to chat with.
    pub model: Model,
    /// The API base URL.
    pub endpoint: String,
    /// The API key.
    pub api_key: String,
    /// Print token usage after each reply.
    pub stats: bool,
    /// Let the model search the web.
    pub web_search: bool,
    /// Instructions sent with every request.
    pub instructions: String,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Model name override.
    pub model: Option<String>,
    /// Endpoint override.
    pub endpoint: Option<String>,
    /// `--stats` was given.
    pub stats: bool,
    /// `--web` was given.
    pub web: bool,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns an error if the model is not in the allow-list or no API key
/// can be found.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let file = &config_file.hlpr;

    // Resolve model first so an invalid name is reported before anything else
    let model = match options.model.as_ref().or(file.model.as_ref()) {
        Some(name) => name.parse::<Model>()?,
        None => Model::default(),
    };

    let endpoint = options
        .endpoint
        .as_ref()
        .or(file.endpoint.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let Some(api_key) = file.get_api_key() else {
        let env_var = file.api_key_env_name();
        bail!(
            "Missing API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/hlpr/config.toml"
        );
    };

    Ok(ResolvedConfig {
        model,
        endpoint,
        api_key,
        stats: options.stats || file.stats.unwrap_or(false),
        web_search: options.web || file.web.unwrap_or(false),
        instructions: file
            .instructions
            .clone()
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
    })
}

/// Manages loading configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/hlpr/config.toml`
    /// or `~/.config/hlpr/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty configuration.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
