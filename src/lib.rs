//! # anypdf - TranslateAnyPDF command-line client
//!
//! `anypdf` submits PDF documents to the TranslateAnyPDF service on RapidAPI,
//! waits for the asynchronous job to finish, and downloads the translated file.
//!
//! ## Quick Start
//!
//! ```bash
//! export RAPIDAPI_KEY=...
//!
//! # Translate one file
//! anypdf translate ./report.pdf --to es --tier small
//!
//! # Page and character counts
//! anypdf analyze ./report.pdf
//!
//! # One file, every language in a CSV with a `language_code` column
//! anypdf batch ./report.pdf --languages languages.csv --output-dir out
//! ```
//!
//! ## Configuration
//!
//! Defaults are read from `~/.config/anypdf/config.toml`:
//!
//! ```toml
//! [anypdf]
//! to = "es"
//! tier = "small"
//! output_dir = "translated_pdfs"
//! poll_interval_secs = 5
//! timeout_secs = 300
//!
//! [service]
//! api_key_env = "RAPIDAPI_KEY"
//! ```

/// Job client: submit, poll, download and analyze against the service.
pub mod api;

/// Batch translation of one document into many languages.
pub mod batch;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// File system utilities.
pub mod fs;

/// Known target language codes.
pub mod language;

/// Diagnostic logging setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal UI components (spinner, colors).
pub mod ui;
