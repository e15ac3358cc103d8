use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::Tier;

#[derive(Parser, Debug)]
#[command(name = "anypdf")]
#[command(about = "Translate and analyze PDF documents with the TranslateAnyPDF API")]
#[command(version)]
pub struct Args {
    /// RapidAPI key
    #[arg(long, global = true, env = "RAPIDAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Suppress status messages and progress
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a PDF file
    Translate {
        /// PDF file to translate
        file: PathBuf,

        /// Target language code (e.g., es, fr, de, uk)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Processing tier
        #[arg(long, value_enum)]
        tier: Option<Tier>,

        /// Where to save the translated PDF
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Seconds between status checks
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Seconds to wait for the job before giving up
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Analyze a PDF file to get page and character counts
    Analyze {
        /// PDF file to analyze
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Translate a PDF file into every language listed in a CSV file
    Batch {
        /// PDF file to translate
        file: PathBuf,

        /// CSV file with a 'language_code' column
        #[arg(short = 'l', long)]
        languages: PathBuf,

        /// Processing tier
        #[arg(long, value_enum)]
        tier: Option<Tier>,

        /// Base directory for per-language outputs
        #[arg(short = 'o', long)]
        output_dir: Option<PathBuf>,

        /// Seconds between status checks
        #[arg(long)]
        poll_interval: Option<u64>,

        /// Seconds to wait for each job before giving up
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// List known language codes
    Languages,
    /// Configure default settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
