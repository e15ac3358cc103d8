mod client;
mod error;
mod service;
mod source;
mod types;

pub use client::{JobClient, PollOptions};
pub use error::{ApiError, ErrorKind, Result};
pub use service::{ByteStream, DEFAULT_BASE_URL, DEFAULT_HOST, HttpService, JobService, ServiceConfig};
pub use source::SourceFile;
pub use types::{AnalysisResult, ApiKey, JobHandle, JobRequest, JobStatus, Tier};

#[cfg(test)]
pub(crate) use client::tests::{FakeService, source_pdf};
