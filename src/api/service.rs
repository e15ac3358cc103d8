//! The remote side of a job: the [`JobService`] seam and its HTTP implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use tracing::{debug, info};

use super::error::{ApiError, Result};
use super::source::SourceFile;
use super::types::{AnalysisResult, ApiKey, JobHandle, JobStatus, Tier};

pub const DEFAULT_HOST: &str = "translateanypdf.p.rapidapi.com";
pub const DEFAULT_BASE_URL: &str = "https://translateanypdf.p.rapidapi.com";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(60);
const DOWNLOAD_READ_TIMEOUT: Duration = Duration::from_secs(120);

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes>> + Send>>;

/// Remote operations a [`JobClient`](super::JobClient) sequences.
///
/// Each method performs exactly one exchange with the service.
pub trait JobService {
    fn submit(
        &self,
        source: &SourceFile,
        target_language: &str,
        tier: Tier,
    ) -> impl Future<Output = Result<JobHandle>> + Send;

    fn status(&self, handle: &JobHandle) -> impl Future<Output = Result<JobStatus>> + Send;

    fn analyze(&self, source: &SourceFile) -> impl Future<Output = Result<AnalysisResult>> + Send;

    /// Opens the result file at `url` as a byte stream.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<ByteStream>> + Send;
}

/// Connection settings for [`HttpService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub host: String,
    pub api_key: ApiKey,
}

impl ServiceConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    job_id: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    download_url: Option<String>,
    error_message: Option<String>,
}

/// TranslateAnyPDF over RapidAPI.
pub struct HttpService {
    client: Client,
    download_client: Client,
    base_url: Url,
    host: String,
    api_key: ApiKey,
}

impl HttpService {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .build()
            .map_err(|e| ApiError::transport(&config.base_url, e))?;
        let download_client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(DOWNLOAD_READ_TIMEOUT)
            .build()
            .map_err(|e| ApiError::transport(&config.base_url, e))?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            ApiError::Validation(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        Ok(Self {
            client,
            download_client,
            base_url,
            host: config.host,
            api_key: config.api_key,
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response> {
        let response = request
            .header("X-RapidAPI-Key", self.api_key.expose())
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await
            .map_err(|e| ApiError::transport(url, e))?;

        debug!(%url, status = %response.status(), "response received");
        Ok(response)
    }
}

impl JobService for HttpService {
    async fn submit(
        &self,
        source: &SourceFile,
        target_language: &str,
        tier: Tier,
    ) -> Result<JobHandle> {
        let url = self.url(&["translate", tier.as_str()]);
        info!(%url, file = %source.file_name, target_language, "submitting translation job");

        let form = Form::new()
            .part("file", file_part(source, &url)?)
            .text("target_lang", target_language.to_string());

        let response = self.send(self.client.post(&url).multipart(form), &url).await?;
        let response = check_status(response, &url, None).await?;
        let body: SubmitResponse = decode_json(response, &url).await?;

        match body {
            SubmitResponse {
                job_id: Some(job_id),
                status,
            } if !job_id.is_empty() => {
                info!(%job_id, status = status.as_deref().unwrap_or("unknown"), "job accepted");
                Ok(JobHandle::new(job_id))
            }
            _ => Err(ApiError::invalid_response(&url, "response carried no job_id")),
        }
    }

    async fn status(&self, handle: &JobHandle) -> Result<JobStatus> {
        let url = self.url(&["status", handle.job_id()]);

        let response = self.send(self.client.get(&url), &url).await?;
        let response = check_status(response, &url, Some(handle.job_id())).await?;
        let body: StatusResponse = decode_json(response, &url).await?;

        interpret_status(handle.job_id(), body)
    }

    async fn analyze(&self, source: &SourceFile) -> Result<AnalysisResult> {
        let url = self.url(&["analyze-pdf"]);
        info!(%url, file = %source.file_name, "analyzing document");

        let form = Form::new().part("file", file_part(source, &url)?);

        let response = self.send(self.client.post(&url).multipart(form), &url).await?;
        let response = check_status(response, &url, None).await?;
        let body: serde_json::Value = decode_json(response, &url).await?;

        interpret_analysis(&url, body)
    }

    async fn fetch(&self, url: &str) -> Result<ByteStream> {
        info!(%url, "downloading result");

        // The download link points at a CDN; service credentials stay off it.
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let owned_url = url.to_string();
        let stream = response
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| ApiError::transport(&owned_url, e)));

        Ok(Box::pin(stream))
    }
}

fn file_part(source: &SourceFile, url: &str) -> Result<Part> {
    Part::bytes(source.bytes.clone())
        .file_name(source.file_name.clone())
        .mime_str("application/pdf")
        .map_err(|e| ApiError::transport(url, e))
}

async fn check_status(response: Response, url: &str, job_id: Option<&str>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response).await;
    debug!(%url, %status, %message, "service rejected request");
    Err(error_for_status(status.as_u16(), message, job_id))
}

async fn decode_json<T: serde::de::DeserializeOwned>(response: Response, url: &str) -> Result<T> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::transport(url, e))?;
    serde_json::from_str(&text).map_err(|e| ApiError::invalid_response(url, e))
}

/// Extracts a human-readable message from an error response body.
async fn error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    message_from_body(&body)
}

fn message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            ["message", "error_message", "detail", "error"]
                .iter()
                .find_map(|key| json.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.chars().take(200).collect())
}

/// Maps an HTTP error status onto the error taxonomy.
///
/// `job_id` is set for status queries, where a 404 means the handle is unknown.
pub(crate) fn error_for_status(status: u16, message: String, job_id: Option<&str>) -> ApiError {
    match (status, job_id) {
        (401 | 403, _) => ApiError::Auth { status, message },
        (429, _) => ApiError::RateLimit(message),
        (404, Some(job_id)) => ApiError::NotFound {
            job_id: job_id.to_string(),
        },
        (400..=499, _) => ApiError::Validation(format!("rejected by service ({status}): {message}")),
        _ => ApiError::Server { status, message },
    }
}

fn interpret_status(job_id: &str, body: StatusResponse) -> Result<JobStatus> {
    let StatusResponse {
        status,
        download_url,
        error_message,
    } = body;

    match status.as_str() {
        "completed" | "succeeded" => match download_url {
            Some(download_url) if !download_url.is_empty() => {
                Ok(JobStatus::Succeeded { download_url })
            }
            _ => Ok(JobStatus::Failed {
                error_message: "job completed but no download URL was provided".to_string(),
            }),
        },
        "error_job_not_found" => Err(ApiError::NotFound {
            job_id: job_id.to_string(),
        }),
        "failed" | "enqueue_failed" => Ok(JobStatus::Failed {
            error_message: error_message.unwrap_or_else(|| format!("job ended with status '{status}'")),
        }),
        s if s.starts_with("error_") => Ok(JobStatus::Failed {
            error_message: error_message.unwrap_or_else(|| format!("job ended with status '{status}'")),
        }),
        "pending" | "queued" => Ok(JobStatus::Pending),
        _ => Ok(JobStatus::Processing),
    }
}

fn interpret_analysis(url: &str, body: serde_json::Value) -> Result<AnalysisResult> {
    if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
        let code = body
            .get("error_code")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        let message = body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("no message provided");
        return Err(ApiError::Validation(format!(
            "analysis rejected: {code} - {message}"
        )));
    }

    serde_json::from_value(body).map_err(|e| ApiError::invalid_response(url, e))
}
