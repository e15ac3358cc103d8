//! Subcommand implementations.

use anyhow::Result;

use crate::config::{ConfigError, ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};

/// Analyze command handler.
pub mod analyze;

/// Batch translation command handler.
pub mod batch;

/// Configure command handler.
pub mod configure;

/// Single-file translation command handler.
pub mod translate;

/// Merges CLI overrides with the config file on disk.
///
/// Failures are wrapped in [`ConfigError`] so `main` can report them with a
/// configuration exit code.
pub fn load_resolved_config(options: &ResolveOptions) -> Result<ResolvedConfig> {
    let resolved = ConfigManager::new()
        .and_then(|manager| manager.load_or_default())
        .and_then(|file_config| resolve_config(options, &file_config))
        .map_err(ConfigError)?;
    Ok(resolved)
}
