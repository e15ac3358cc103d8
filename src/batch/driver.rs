use std::path::{Path, PathBuf};

use tracing::{Instrument, info, info_span, warn};

use crate::api::{ErrorKind, JobClient, JobRequest, JobService, PollOptions, Tier};
use crate::language::is_known_language;

/// Settings shared by every language in one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub tier: Tier,
    pub output_dir: PathBuf,
    pub poll: PollOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { output_path: PathBuf },
    Failed { kind: ErrorKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub language: String,
    pub outcome: Outcome,
}

impl BatchEntry {
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Succeeded { .. })
    }
}

/// Per-language outcomes of a batch run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRecord {
    entries: Vec<BatchEntry>,
}

impl BatchRecord {
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn push(&mut self, entry: BatchEntry) -> &BatchEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }
}

/// Where the translation of `source` into `language` is written:
/// `<output_dir>/<language>/translated_<stem>_<language>.<ext>`.
pub fn output_path(output_dir: &Path, source: &Path, language: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map_or_else(|| "document".into(), |s| s.to_string_lossy());
    let file_name = match source.extension() {
        Some(ext) => format!("translated_{stem}_{language}.{}", ext.to_string_lossy()),
        None => format!("translated_{stem}_{language}"),
    };
    output_dir.join(language).join(file_name)
}

/// Language codes become directory names, so they must be a single plain path
/// component.
fn is_path_safe(language: &str) -> bool {
    !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Translates `source` into every language in `languages`, one after another.
///
/// A failure for one language is recorded and the loop moves on; the record
/// always has exactly one entry per input language. `on_entry` sees each entry
/// as soon as it is final.
pub async fn run_batch<S, F>(
    client: &JobClient<S>,
    source: &Path,
    languages: &[String],
    options: &BatchOptions,
    mut on_entry: F,
) -> BatchRecord
where
    S: JobService,
    F: FnMut(&BatchEntry),
{
    let mut record = BatchRecord::default();
    info!(
        source = %source.display(),
        tier = %options.tier,
        languages = languages.len(),
        "starting batch"
    );

    for language in languages {
        let outcome = translate_one(client, source, language, options)
            .instrument(info_span!("batch", language = %language))
            .await;

        let entry = record.push(BatchEntry {
            language: language.clone(),
            outcome,
        });
        on_entry(entry);
    }

    info!(
        succeeded = record.succeeded(),
        failed = record.failed(),
        "batch finished"
    );
    record
}

async fn translate_one<S: JobService>(
    client: &JobClient<S>,
    source: &Path,
    language: &str,
    options: &BatchOptions,
) -> Outcome {
    if !is_path_safe(language) {
        return Outcome::Failed {
            kind: ErrorKind::Validation,
            message: format!("'{language}' cannot be used as an output directory name"),
        };
    }
    if !is_known_language(language) {
        warn!("language code is not in the known list; submitting anyway");
    }

    let request = JobRequest::new(source, language, options.tier);
    let destination = output_path(&options.output_dir, source, language);

    match client.translate(&request, options.poll, &destination).await {
        Ok(output_path) => Outcome::Succeeded { output_path },
        Err(e) => {
            warn!(kind = %e.kind(), error = %e, "translation failed");
            Outcome::Failed {
                kind: e.kind(),
                message: e.to_string(),
            }
        }
    }
}
