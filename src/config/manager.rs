use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{ApiKey, DEFAULT_BASE_URL, DEFAULT_HOST, PollOptions, ServiceConfig, Tier};
use crate::paths;

/// Environment variable consulted for the API key when nothing else is given.
pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Output directory used when neither CLI nor config file names one.
pub const DEFAULT_OUTPUT_DIR: &str = "translated_pdfs";

/// Default settings in the `[anypdf]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default target language code.
    pub to: Option<String>,
    /// Default processing tier.
    pub tier: Option<Tier>,
    /// Base directory for translated files.
    pub output_dir: Option<PathBuf>,
    /// Seconds between status polls.
    pub poll_interval_secs: Option<u64>,
    /// Seconds to wait for a job before giving up.
    pub timeout_secs: Option<u64>,
}

/// Connection settings in the `[service]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSection {
    pub base_url: Option<String>,
    pub host: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl ServiceSection {
    /// Gets the API key, preferring the named environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|k| !k.is_empty())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/anypdf/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub anypdf: DefaultsConfig,
    #[serde(default)]
    pub service: ServiceSection,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub service: ServiceConfig,
    /// Target language, if one was given anywhere. Only translate needs it.
    pub to: Option<String>,
    pub tier: Tier,
    pub output_dir: PathBuf,
    pub poll: PollOptions,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// From `--api-key` or `RAPIDAPI_KEY`.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub to: Option<String>,
    pub tier: Option<Tier>,
    pub output_dir: Option<PathBuf>,
    pub poll_interval_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI option, then config file, then built-in default.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let defaults = &config_file.anypdf;
    let service = &config_file.service;

    let api_key = options
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .or_else(|| service.get_api_key())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: API key\n\n\
                 Please provide it via:\n  \
                 - CLI option: anypdf --api-key <key>\n  \
                 - Environment: export {API_KEY_ENV}=\"your-api-key\"\n  \
                 - Config file: ~/.config/anypdf/config.toml ([service] api_key_env or api_key)"
            )
        })?;

    let poll_interval_secs = options
        .poll_interval_secs
        .or(defaults.poll_interval_secs)
        .unwrap_or(PollOptions::DEFAULT_INTERVAL.as_secs());
    if poll_interval_secs == 0 {
        bail!("Invalid configuration: poll interval must be at least 1 second");
    }

    let timeout_secs = options
        .timeout_secs
        .or(defaults.timeout_secs)
        .unwrap_or(PollOptions::DEFAULT_TIMEOUT.as_secs());
    if timeout_secs == 0 {
        bail!("Invalid configuration: timeout must be at least 1 second");
    }

    let base_url = options
        .base_url
        .clone()
        .or_else(|| service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        bail!("Invalid configuration: base URL must start with http:// or https:// (got '{base_url}')");
    }

    Ok(ResolvedConfig {
        service: ServiceConfig {
            base_url,
            host: service
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            api_key: ApiKey::new(api_key),
        },
        to: options.to.clone().or_else(|| defaults.to.clone()),
        tier: options.tier.or(defaults.tier).unwrap_or_default(),
        output_dir: options
            .output_dir
            .clone()
            .or_else(|| defaults.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        poll: PollOptions::new(
            Duration::from_secs(poll_interval_secs),
            Duration::from_secs(timeout_secs),
        ),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/anypdf/config.toml`
    /// or `~/.config/anypdf/config.toml` if `XDG_CONFIG_HOME` is not set.
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

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}
