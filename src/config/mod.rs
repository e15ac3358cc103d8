mod manager;

pub use manager::{
    API_KEY_ENV, ConfigFile, ConfigManager, DEFAULT_OUTPUT_DIR, DefaultsConfig, ResolveOptions,
    ResolvedConfig, ServiceSection, resolve_config,
};

/// Configuration could not be resolved (missing key, invalid value, unreadable file).
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ConfigError(#[from] pub anyhow::Error);
