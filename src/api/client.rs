use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use super::error::{ApiError, Result};
use super::service::JobService;
use super::source::SourceFile;
use super::types::{AnalysisResult, JobHandle, JobRequest, JobStatus};
use crate::fs::PartialFile;

/// Wait policy for [`JobClient::await_completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Fixed delay between two status queries.
    pub interval: Duration,
    /// Upper bound on the total wait.
    pub timeout: Duration,
}

impl PollOptions {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_TIMEOUT)
    }
}

/// Drives submit, poll and download against a [`JobService`].
///
/// No operation retries on its own: a resubmission would start a second,
/// separately billed job.
pub struct JobClient<S> {
    service: S,
}

impl<S: JobService> JobClient<S> {
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Uploads the source document and starts a translation job.
    pub async fn submit(&self, request: &JobRequest) -> Result<JobHandle> {
        let source = SourceFile::read(&request.source).await?;
        self.service
            .submit(&source, &request.target_language, request.tier)
            .await
    }

    /// Queries the job's current status once.
    pub async fn poll(&self, handle: &JobHandle) -> Result<JobStatus> {
        let status = self.service.status(handle).await?;
        debug!(job_id = %handle, status = status.label(), "polled job");
        Ok(status)
    }

    /// Polls every `options.interval` until the job reaches a terminal status.
    ///
    /// The handle is consumed: once a terminal status has been observed there is
    /// nothing left to ask the service about it.
    pub async fn await_completion(
        &self,
        handle: JobHandle,
        options: PollOptions,
    ) -> Result<JobStatus> {
        let started = Instant::now();
        let deadline = started + options.timeout;
        let mut attempt = 1u32;

        loop {
            let status = self.poll(&handle).await?;
            if status.is_terminal() {
                info!(job_id = %handle, status = status.label(), attempt, "job finished");
                return Ok(status);
            }

            if Instant::now() + options.interval > deadline {
                warn!(job_id = %handle, attempt, "gave up waiting for job");
                return Err(ApiError::Timeout {
                    job_id: handle.job_id().to_string(),
                    waited_secs: started.elapsed().as_secs(),
                    last_status: status.label().to_string(),
                });
            }

            debug!(job_id = %handle, attempt, wait = ?options.interval, "job still running");
            sleep(options.interval).await;
            attempt += 1;
        }
    }

    /// Streams the file at `download_url` to `destination`.
    ///
    /// Bytes land in a temporary sibling first; `destination` appears only once
    /// the whole body has been written.
    pub async fn download(&self, download_url: &str, destination: &Path) -> Result<PathBuf> {
        let mut stream = self.service.fetch(download_url).await?;
        let mut partial = PartialFile::create(destination)
            .await
            .map_err(|e| ApiError::io(destination, e))?;

        let mut received = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            received += chunk.len();
            partial
                .write_all(&chunk)
                .await
                .map_err(|e| ApiError::io(partial.temp_path(), e))?;
        }

        let path = partial
            .commit()
            .await
            .map_err(|e| ApiError::io(destination, e))?;
        info!(path = %path.display(), bytes = received, "download complete");
        Ok(path)
    }

    /// Runs one translation end to end and returns where the result was written.
    pub async fn translate(
        &self,
        request: &JobRequest,
        options: PollOptions,
        destination: &Path,
    ) -> Result<PathBuf> {
        let handle = self.submit(request).await?;
        let job_id = handle.job_id().to_string();

        let status = self.await_completion(handle, options).await?;
        let download_url = download_url_of(job_id, status)?;
        self.download(&download_url, destination).await
    }

    /// Fetches page and text statistics for a document. One request, no polling.
    pub async fn analyze(&self, path: &Path) -> Result<AnalysisResult> {
        let source = SourceFile::read(path).await?;
        self.service.analyze(&source).await
    }
}

/// The result link of a finished job, or the error its final status stands for.
fn download_url_of(job_id: String, status: JobStatus) -> Result<String> {
    match status {
        JobStatus::Succeeded { download_url } => Ok(download_url),
        JobStatus::Failed { error_message } => Err(ApiError::RemoteProcessing {
            job_id,
            message: error_message,
        }),
        unfinished @ (JobStatus::Pending | JobStatus::Processing) => Err(ApiError::Unfinished {
            job_id,
            status: unfinished.label(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use crate::api::service::ByteStream;
    use crate::api::{ErrorKind, Tier};
    use bytes::Bytes;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory stand-in for the remote service.
    ///
    /// Each submitted job walks through `script` one status per poll; the last
    /// entry repeats. Languages listed in `rejected` fail submission.
    #[derive(Default)]
    pub(crate) struct FakeService {
        pub script: Vec<JobStatus>,
        pub rejected: Vec<String>,
        pub body: Vec<Bytes>,
        pub fail_body: bool,
        pub jobs: Mutex<HashMap<String, VecDeque<JobStatus>>>,
        pub submissions: Mutex<Vec<String>>,
        pub poll_times: Mutex<Vec<Instant>>,
        pub fetches: Mutex<usize>,
    }

    impl FakeService {
        pub(crate) fn completing_after(polls: usize) -> Self {
            let mut script = vec![JobStatus::Pending; 1];
            script.extend(std::iter::repeat_n(JobStatus::Processing, polls.saturating_sub(1)));
            script.push(JobStatus::Succeeded {
                download_url: "https://cdn.example/result.pdf".to_string(),
            });
            Self {
                script,
                body: vec![Bytes::from_static(b"%PDF-"), Bytes::from_static(b"translated")],
                ..Self::default()
            }
        }

        pub(crate) fn poll_count(&self) -> usize {
            self.poll_times.lock().unwrap().len()
        }
    }

    impl JobService for FakeService {
        async fn submit(
            &self,
            _source: &SourceFile,
            target_language: &str,
            _tier: Tier,
        ) -> Result<JobHandle> {
            if self.rejected.iter().any(|l| l == target_language) {
                return Err(ApiError::Validation(format!(
                    "rejected by service (400): Unsupported target language: {target_language}"
                )));
            }
            let mut submissions = self.submissions.lock().unwrap();
            submissions.push(target_language.to_string());
            let job_id = format!("job-{}", submissions.len());
            self.jobs
                .lock()
                .unwrap()
                .insert(job_id.clone(), self.script.iter().cloned().collect());
            Ok(JobHandle::new(job_id))
        }

        async fn status(&self, handle: &JobHandle) -> Result<JobStatus> {
            self.poll_times.lock().unwrap().push(Instant::now());
            let mut jobs = self.jobs.lock().unwrap();
            let queue = jobs.get_mut(handle.job_id()).ok_or_else(|| ApiError::NotFound {
                job_id: handle.job_id().to_string(),
            })?;
            let status = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            Ok(status.unwrap_or(JobStatus::Processing))
        }

        async fn analyze(&self, source: &SourceFile) -> Result<AnalysisResult> {
            Ok(AnalysisResult {
                page_count: 1,
                character_count: source.bytes.len() as u64,
                word_count: source.bytes.split(u8::is_ascii_whitespace).count() as u64,
                text_extractable: true,
            })
        }

        async fn fetch(&self, url: &str) -> Result<ByteStream> {
            *self.fetches.lock().unwrap() += 1;
            let mut items: Vec<Result<Bytes>> = self.body.iter().cloned().map(Ok).collect();
            if self.fail_body {
                items.push(Err(ApiError::Server {
                    status: 500,
                    message: format!("connection reset while reading {url}"),
                }));
            }
            Ok(Box::pin(futures_util::stream::iter(items)))
        }
    }

    pub(crate) fn source_pdf(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF-1.7 quarterly report").unwrap();
        path
    }

    fn fast_poll() -> PollOptions {
        PollOptions::new(Duration::from_secs(5), Duration::from_secs(300))
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_right_after_submit_is_not_terminal() {
        let dir = TempDir::new().unwrap();
        let client = JobClient::new(FakeService::completing_after(3));
        let request = JobRequest::new(source_pdf(&dir), "es", Tier::Small);

        let handle = client.submit(&request).await.unwrap();
        let status = client.poll(&handle).await.unwrap();

        assert!(!status.is_terminal());
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_completion_respects_interval_and_stops_on_terminal() {
        let dir = TempDir::new().unwrap();
        let client = JobClient::new(FakeService::completing_after(3));
        let request = JobRequest::new(source_pdf(&dir), "es", Tier::Small);
        let options = fast_poll();

        let handle = client.submit(&request).await.unwrap();
        let status = client.await_completion(handle, options).await.unwrap();

        assert!(matches!(status, JobStatus::Succeeded { .. }));
        let times = client.service().poll_times.lock().unwrap().clone();
        assert_eq!(times.len(), 4);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= options.interval);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_await_completion_times_out() {
        let dir = TempDir::new().unwrap();
        let client = JobClient::new(FakeService::completing_after(100));
        let request = JobRequest::new(source_pdf(&dir), "es", Tier::Small);
        let options = PollOptions::new(Duration::from_secs(5), Duration::from_secs(12));

        let handle = client.submit(&request).await.unwrap();
        let err = client.await_completion(handle, options).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(client.service().poll_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_translate_timeout_performs_no_download() {
        let dir = TempDir::new().unwrap();
        let client = JobClient::new(FakeService::completing_after(100));
        let request = JobRequest::new(source_pdf(&dir), "es", Tier::Small);
        let destination = dir.path().join("out").join("report_es.pdf");
        let options = PollOptions::new(Duration::from_secs(5), Duration::from_secs(10));

        let err = client
            .translate(&request, options, &destination)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(*client.service().fetches.lock().unwrap(), 0);
        assert!(!destination.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_translate_writes_result() {
        let dir = TempDir::new().unwrap();
        let client = JobClient::new(FakeService::completing_after(2));
        let request = JobRequest::new(source_pdf(&dir), "fr", Tier::Medium);
        let destination = dir.path().join("fr").join("report_fr.pdf");

        let written = client
            .translate(&request, fast_poll(), &destination)
            .await
            .unwrap();

        assert_eq!(written, destination);
        assert_eq!(std::fs::read(&destination).unwrap(), b"%PDF-translated");
    }

    #[tokio::test(start_paused = true)]
    async fn test_translate_failed_job_is_remote_processing_error() {
        let dir = TempDir::new().unwrap();
        let service = FakeService {
            script: vec![
                JobStatus::Processing,
                JobStatus::Failed {
                    error_message: "tier page limit exceeded".to_string(),
                },
            ],
            ..FakeService::default()
        };
        let client = JobClient::new(service);
        let request = JobRequest::new(source_pdf(&dir), "de", Tier::Small);
        let destination = dir.path().join("report_de.pdf");

        let err = client
            .translate(&request, fast_poll(), &destination)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RemoteProcessing);
        assert!(err.to_string().contains("tier page limit exceeded"));
        assert_eq!(*client.service().fetches.lock().unwrap(), 0);
    }

    #[test]
    fn test_unfinished_status_names_the_job() {
        let err = download_url_of("job-9".to_string(), JobStatus::Processing).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        let message = err.to_string();
        assert!(message.contains("job-9"));
        assert!(message.contains("processing"));
        assert!(!message.contains("response from"));
    }

    #[test]
    fn test_succeeded_status_yields_download_url() {
        let status = JobStatus::Succeeded {
            download_url: "https://cdn.example/j.pdf".to_string(),
        };
        assert_eq!(
            download_url_of("job-1".to_string(), status).unwrap(),
            "https://cdn.example/j.pdf"
        );
    }

    #[tokio::test]
    async fn test_submit_missing_source_never_reaches_service() {
        let client = JobClient::new(FakeService::completing_after(1));
        let request = JobRequest::new("/nonexistent/report.pdf", "es", Tier::Small);

        let err = client.submit(&request).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(client.service().submissions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_poll_unknown_job_is_not_found() {
        let client = JobClient::new(FakeService::completing_after(1));

        let err = client
            .poll(&JobHandle::new("never-issued"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_download_failure_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let service = FakeService {
            body: vec![Bytes::from_static(b"first half")],
            fail_body: true,
            ..FakeService::default()
        };
        let client = JobClient::new(service);
        let destination = dir.path().join("es").join("out.pdf");

        let err = client
            .download("https://cdn.example/out.pdf", &destination)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!destination.exists());
        assert!(!dir.path().join("es").join(".out.pdf.part").exists());
    }

    #[tokio::test]
    async fn test_download_into_unwritable_location_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let client = JobClient::new(FakeService::completing_after(1));

        let err = client
            .download("https://cdn.example/out.pdf", &blocker.join("out.pdf"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[tokio::test]
    async fn test_analyze_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = source_pdf(&dir);
        let client = JobClient::new(FakeService::default());

        let first = client.analyze(&path).await.unwrap();
        let second = client.analyze(&path).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_analyze_missing_file_is_validation_error() {
        let client = JobClient::new(FakeService::default());

        let err = client
            .analyze(Path::new("/nonexistent/report.pdf"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
