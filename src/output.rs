//! Global output configuration and utilities.
//!
//! Results (output paths, analysis fields, batch lines) go to stdout so they can
//! be piped. Status lines, warnings, the spinner and logs go to stderr.

use std::io::IsTerminal;
use std::sync::OnceLock;

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress status lines and the spinner. Results and warnings still print.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl OutputConfig {
    /// Combines the CLI flags with the environment.
    ///
    /// Colors are off when `--no-color` is given, when `NO_COLOR` is set
    /// (<https://no-color.org/>), or when stderr is not a terminal.
    pub fn from_flags(quiet: bool, no_color: bool) -> Self {
        let no_color =
            no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stderr().is_terminal();
        Self { quiet, no_color }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_flags(false, false)
    }
}

/// Sets the process-wide output configuration. Only the first call has an effect.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

pub fn config() -> OutputConfig {
    *OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

pub fn is_quiet() -> bool {
    config().quiet
}

pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr unless `--quiet` was given.
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a `warning:`-prefixed message to stderr, even in quiet mode.
#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {
        eprintln!(
            "{} {}",
            $crate::ui::Style::warning("warning:"),
            format_args!($($arg)*)
        );
    };
}
