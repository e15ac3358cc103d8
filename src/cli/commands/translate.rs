use anyhow::Result;
use std::path::{Path, PathBuf};

use super::load_resolved_config;
use crate::api::{HttpService, JobClient, JobRequest};
use crate::config::{ConfigError, ResolveOptions};
use crate::language::{describe_language, is_known_language};
use crate::ui::{Spinner, Style};
use crate::{status, warning};

pub struct TranslateOptions {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub resolve: ResolveOptions,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let config = load_resolved_config(&options.resolve)?;

    let to = config.to.clone().ok_or_else(|| {
        ConfigError(anyhow::anyhow!(
            "Missing required configuration: 'to' (target language)\n\n\
             Please provide it via:\n  \
             - CLI option: anypdf translate --to <lang> <file>\n  \
             - Config file: Run 'anypdf configure' to set a default"
        ))
    })?;

    if !is_known_language(&to) {
        warning!("'{to}' is not a known language code; submitting anyway");
    }

    let destination = options
        .output
        .unwrap_or_else(|| default_output_path(&config.output_dir, &options.file, &to));

    let client = JobClient::new(HttpService::new(config.service)?);
    let request = JobRequest::new(&options.file, &to, config.tier);

    status!(
        "Translating {} to {} ({} tier)",
        Style::value(options.file.display()),
        Style::code(describe_language(&to)),
        config.tier
    );

    let spinner = Spinner::new(format!("Waiting for the {to} translation..."));
    let result = client.translate(&request, config.poll, &destination).await;
    spinner.stop();
    let written = result?;

    status!(
        "{} Saved translation to {}",
        Style::success("✓"),
        Style::value(written.display())
    );
    println!("{}", written.display());

    Ok(())
}

/// `<output_dir>/translated_<lang>_<file name>`.
pub fn default_output_path(output_dir: &Path, source: &Path, language: &str) -> PathBuf {
    let file_name = source
        .file_name()
        .map_or_else(|| "document.pdf".into(), |n| n.to_string_lossy());
    output_dir.join(format!("translated_{language}_{file_name}"))
}
