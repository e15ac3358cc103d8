//! Translating one document into many languages listed in a CSV table.

mod driver;
mod languages;

pub use driver::{BatchEntry, BatchOptions, BatchRecord, Outcome, output_path, run_batch};
pub use languages::{LANGUAGE_COLUMN, parse_language_codes, read_language_codes};
