use clap::Parser;

use anypdf_cli::api::{ApiError, Tier};
use anypdf_cli::cli::commands::batch::{BatchCommandOptions, BatchFailed, run_batch_command};
use anypdf_cli::cli::commands::{analyze, configure, translate};
use anypdf_cli::cli::{Args, Command};
use anypdf_cli::config::{ConfigError, ResolveOptions};
use anypdf_cli::language::print_languages;
use anypdf_cli::output::{self, OutputConfig};
use anypdf_cli::{logging, ui::Style};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    logging::init(args.verbose, output::is_no_color());

    if let Err(err) = run(args).await {
        report(&err);
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let base = ResolveOptions {
        api_key: args.api_key,
        base_url: args.base_url,
        ..ResolveOptions::default()
    };

    match args.command {
        Command::Translate {
            file,
            to,
            tier,
            output,
            poll_interval,
            timeout,
        } => {
            let options = translate::TranslateOptions {
                file,
                output,
                resolve: with_job_settings(base, to, tier, None, poll_interval, timeout),
            };
            translate::run_translate(options).await?;
        }
        Command::Analyze { file, json } => {
            let options = analyze::AnalyzeOptions {
                file,
                json,
                resolve: base,
            };
            analyze::run_analyze(options).await?;
        }
        Command::Batch {
            file,
            languages,
            tier,
            output_dir,
            poll_interval,
            timeout,
        } => {
            let options = BatchCommandOptions {
                file,
                languages,
                resolve: with_job_settings(base, None, tier, output_dir, poll_interval, timeout),
            };
            run_batch_command(options).await?;
        }
        Command::Languages => print_languages(),
        Command::Configure { show } => {
            if show {
                configure::show_config()?;
            } else {
                configure::run_configure()?;
            }
        }
    }

    Ok(())
}

fn with_job_settings(
    base: ResolveOptions,
    to: Option<String>,
    tier: Option<Tier>,
    output_dir: Option<std::path::PathBuf>,
    poll_interval_secs: Option<u64>,
    timeout_secs: Option<u64>,
) -> ResolveOptions {
    ResolveOptions {
        to,
        tier,
        output_dir,
        poll_interval_secs,
        timeout_secs,
        ..base
    }
}

fn report(err: &anyhow::Error) {
    if let Some(api_error) = err.downcast_ref::<ApiError>() {
        eprintln!(
            "{} {}: {api_error}",
            Style::error("Error:"),
            api_error.kind()
        );
    } else {
        eprintln!("{} {err:#}", Style::error("Error:"));
    }
}

fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    if let Some(api_error) = err.downcast_ref::<ApiError>() {
        api_error.kind().exit_code()
    } else if err.downcast_ref::<ConfigError>().is_some() {
        exitcode::CONFIG
    } else if err.downcast_ref::<BatchFailed>().is_some() {
        exitcode::SOFTWARE
    } else {
        1
    }
}
