//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! config file lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for anypdf.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/anypdf` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/anypdf` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join("anypdf")),
        _ => Ok(home_dir()?.join(".config").join("anypdf")),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
