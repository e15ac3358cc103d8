use anyhow::{Context, Result};
use std::path::PathBuf;

use super::load_resolved_config;
use crate::api::{AnalysisResult, HttpService, JobClient};
use crate::config::ResolveOptions;
use crate::status;
use crate::ui::{Spinner, Style};

pub struct AnalyzeOptions {
    pub file: PathBuf,
    pub json: bool,
    pub resolve: ResolveOptions,
}

pub async fn run_analyze(options: AnalyzeOptions) -> Result<()> {
    let config = load_resolved_config(&options.resolve)?;
    let client = JobClient::new(HttpService::new(config.service)?);

    status!("Analyzing {}", Style::value(options.file.display()));

    let spinner = Spinner::new("Analyzing...");
    let result = client.analyze(&options.file).await;
    spinner.stop();
    let analysis = result?;

    if options.json {
        let json = serde_json::to_string_pretty(&analysis).context("Failed to encode analysis")?;
        println!("{json}");
    } else {
        print_analysis(&analysis);
    }

    Ok(())
}

fn print_analysis(analysis: &AnalysisResult) {
    println!("{}", Style::header("PDF analysis"));
    println!("  {}             {}", Style::label("pages"), Style::value(analysis.page_count));
    println!(
        "  {}        {}",
        Style::label("characters"),
        Style::value(analysis.character_count)
    );
    println!("  {}             {}", Style::label("words"), Style::value(analysis.word_count));
    println!(
        "  {}  {}",
        Style::label("text extractable"),
        Style::value(if analysis.text_extractable { "yes" } else { "no" })
    );
}
