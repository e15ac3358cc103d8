use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

use super::load_resolved_config;
use crate::api::{HttpService, JobClient, SourceFile};
use crate::batch::{BatchEntry, BatchOptions, BatchRecord, Outcome, read_language_codes, run_batch};
use crate::config::ResolveOptions;
use crate::status;
use crate::ui::{Spinner, Style};

pub struct BatchCommandOptions {
    pub file: PathBuf,
    pub languages: PathBuf,
    pub resolve: ResolveOptions,
}

/// At least one language in a batch failed. The summary has already been printed.
#[derive(Debug, Error)]
#[error("{failed} of {total} languages failed")]
pub struct BatchFailed {
    pub failed: usize,
    pub total: usize,
}

pub async fn run_batch_command(options: BatchCommandOptions) -> Result<()> {
    let config = load_resolved_config(&options.resolve)?;

    // One up-front check instead of the same failure once per language.
    SourceFile::read(&options.file).await?;

    let languages = read_language_codes(&options.languages)?;
    if languages.is_empty() {
        status!(
            "No languages found in {}",
            Style::value(options.languages.display())
        );
        return Ok(());
    }

    status!(
        "Translating {} into {} languages ({} tier) under {}",
        Style::value(options.file.display()),
        languages.len(),
        config.tier,
        Style::value(config.output_dir.display())
    );

    let batch_options = BatchOptions {
        tier: config.tier,
        output_dir: config.output_dir.clone(),
        poll: config.poll,
    };
    let client = JobClient::new(HttpService::new(config.service)?);

    let total = languages.len();
    let spinner = Spinner::new(format!("0/{total} languages done"));
    let mut done = 0;
    let record = run_batch(&client, &options.file, &languages, &batch_options, |entry| {
        done += 1;
        spinner.suspend(|| print_entry(entry));
        spinner.set_message(format!("{done}/{total} languages done"));
    })
    .await;
    spinner.stop();
    print_summary(&record);

    if record.is_success() {
        Ok(())
    } else {
        Err(BatchFailed {
            failed: record.failed(),
            total: record.len(),
        }
        .into())
    }
}

fn print_entry(entry: &BatchEntry) {
    match &entry.outcome {
        Outcome::Succeeded { output_path } => println!(
            "  {} {:6} {}",
            Style::success("✓"),
            Style::code(&entry.language),
            output_path.display()
        ),
        Outcome::Failed { kind, message } => println!(
            "  {} {:6} {}: {}",
            Style::error("✗"),
            Style::code(&entry.language),
            kind,
            message
        ),
    }
}

fn print_summary(record: &BatchRecord) {
    println!();
    println!(
        "{} {} succeeded, {} failed ({} total)",
        Style::header("Batch summary:"),
        Style::success(record.succeeded()),
        if record.failed() > 0 {
            Style::error(record.failed())
        } else {
            record.failed().to_string()
        },
        record.len()
    );
}
