//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Select, Text};
use std::path::PathBuf;

use crate::api::{PollOptions, Tier};
use crate::config::{API_KEY_ENV, ConfigFile, ConfigManager, DEFAULT_OUTPUT_DIR, DefaultsConfig};
use crate::language::KNOWN_LANGUAGES;
use crate::status;
use crate::ui::{PromptOutcome, Style, run_prompts};

const NO_DEFAULT: &str = "(none)";

/// Prints the configuration file contents with secrets masked.
pub fn show_config() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default()?;

    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    print_current_defaults(&config);

    println!("{}", Style::header("Service"));
    print_setting("base_url", config.service.base_url.as_deref());
    print_setting("host", config.service.host.as_deref());
    print_setting("api_key_env", config.service.api_key_env.as_deref());
    let key_state = if config.service.get_api_key().is_some() {
        "(set)"
    } else if std::env::var(API_KEY_ENV).is_ok_and(|k| !k.is_empty()) {
        "(from RAPIDAPI_KEY)"
    } else {
        "(not set)"
    };
    println!("  {:<20}{}", Style::label("api_key"), Style::secondary(key_state));

    Ok(())
}

/// Runs the configure command to edit default settings.
///
/// Lets the user set the default target language, tier, output directory and
/// polling behaviour. Cancelling any prompt leaves the file untouched.
pub fn run_configure() -> Result<()> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    match run_prompts(|| prompt_defaults(&config.anypdf))? {
        PromptOutcome::Completed(defaults) => {
            config.anypdf = defaults;
            manager.save(&config)?;
            println!();
            println!(
                "{} Configuration saved to {}",
                Style::success("✓"),
                Style::secondary(manager.config_path().display())
            );
        }
        PromptOutcome::Cancelled => {
            status!("Cancelled; configuration left unchanged");
        }
    }

    Ok(())
}

fn prompt_defaults(current: &DefaultsConfig) -> Result<DefaultsConfig> {
    let to = select_target_language(current.to.as_deref())?;
    let tier = select_tier(current.tier)?;
    let output_dir = prompt_output_dir(current.output_dir.as_ref())?;
    let poll_interval_secs = prompt_seconds(
        "Seconds between status checks:",
        current
            .poll_interval_secs
            .unwrap_or(PollOptions::DEFAULT_INTERVAL.as_secs()),
    )?;
    let timeout_secs = prompt_seconds(
        "Seconds to wait for a job:",
        current
            .timeout_secs
            .unwrap_or(PollOptions::DEFAULT_TIMEOUT.as_secs()),
    )?;

    Ok(DefaultsConfig {
        to,
        tier: Some(tier),
        output_dir: Some(output_dir),
        poll_interval_secs: Some(poll_interval_secs),
        timeout_secs: Some(timeout_secs),
    })
}

fn print_setting(name: &str, value: Option<&str>) {
    println!(
        "  {:<20}{}",
        Style::label(name),
        value.map_or_else(|| Style::secondary("(not set)"), Style::value)
    );
}

fn print_current_defaults(config: &ConfigFile) {
    let defaults = &config.anypdf;
    println!("{}", Style::header("Current defaults"));
    print_setting("to", defaults.to.as_deref());
    print_setting("tier", defaults.tier.map(Tier::as_str));
    print_setting(
        "output_dir",
        defaults
            .output_dir
            .as_deref()
            .and_then(|p| p.to_str()),
    );
    print_setting(
        "poll_interval_secs",
        defaults.poll_interval_secs.map(|s| s.to_string()).as_deref(),
    );
    print_setting(
        "timeout_secs",
        defaults.timeout_secs.map(|s| s.to_string()).as_deref(),
    );
    println!();
}

fn select_target_language(default: Option<&str>) -> Result<Option<String>> {
    // Build options with format "code - Name"
    let mut options = vec![NO_DEFAULT.to_string()];
    options.extend(
        KNOWN_LANGUAGES
            .iter()
            .map(|(code, name)| format!("{code} - {name}")),
    );

    let default_index = default
        .and_then(|d| KNOWN_LANGUAGES.iter().position(|(code, _)| *code == d))
        .map_or(0, |idx| idx + 1);

    let selection = Select::new("Default target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    if selection == NO_DEFAULT {
        return Ok(None);
    }

    // Extract code from "code - Name" format
    let code = selection.split(" - ").next().unwrap_or(&selection);
    Ok(Some(code.to_string()))
}

fn select_tier(default: Option<Tier>) -> Result<Tier> {
    let default_index = default
        .and_then(|d| Tier::ALL.iter().position(|t| *t == d))
        .unwrap_or(0);

    let selection = Select::new("Default tier:", Tier::ALL.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn prompt_output_dir(default: Option<&PathBuf>) -> Result<PathBuf> {
    let default = default
        .and_then(|p| p.to_str())
        .unwrap_or(DEFAULT_OUTPUT_DIR)
        .to_string();

    let dir = Text::new("Output directory:")
        .with_default(&default)
        .prompt()?;

    if dir.trim().is_empty() {
        bail!("Output directory cannot be empty");
    }

    Ok(PathBuf::from(dir.trim()))
}

fn prompt_seconds(message: &str, default: u64) -> Result<u64> {
    let default = default.to_string();
    let value = Text::new(message).with_default(&default).prompt()?;

    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => bail!("Expected a positive number of seconds, got '{}'", value.trim()),
    }
}
