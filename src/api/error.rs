//! Error taxonomy for calls against the translation service.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Coarse classification of an [`ApiError`], used for batch records and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Auth,
    Validation,
    RateLimit,
    NotFound,
    Timeout,
    RemoteProcessing,
    Io,
    InvalidResponse,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "TransportError",
            Self::Auth => "AuthError",
            Self::Validation => "ValidationError",
            Self::RateLimit => "RateLimitError",
            Self::NotFound => "NotFoundError",
            Self::Timeout => "TimeoutError",
            Self::RemoteProcessing => "RemoteProcessingError",
            Self::Io => "IOError",
            Self::InvalidResponse => "InvalidResponse",
        }
    }

    /// Process exit code reported when a single operation fails with this kind.
    pub const fn exit_code(self) -> exitcode::ExitCode {
        match self {
            Self::Transport => exitcode::UNAVAILABLE,
            Self::Auth => exitcode::NOPERM,
            Self::Validation => exitcode::DATAERR,
            Self::RateLimit | Self::Timeout => exitcode::TEMPFAIL,
            Self::NotFound => exitcode::NOINPUT,
            Self::RemoteProcessing => exitcode::SOFTWARE,
            Self::Io => exitcode::IOERR,
            Self::InvalidResponse => exitcode::PROTOCOL,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("service error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("unauthorized ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("job '{job_id}' not found")]
    NotFound { job_id: String },

    #[error("job '{job_id}' did not finish within {waited_secs}s (last status: {last_status})")]
    Timeout {
        job_id: String,
        waited_secs: u64,
        last_status: String,
    },

    #[error("job '{job_id}' failed: {message}")]
    RemoteProcessing { job_id: String, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("job '{job_id}' is still {status}; expected a finished job")]
    Unfinished { job_id: String, status: &'static str },
}

impl ApiError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::Server { .. } => ErrorKind::Transport,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Validation(_) => ErrorKind::Validation,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::RemoteProcessing { .. } => ErrorKind::RemoteProcessing,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidResponse { .. } | Self::Unfinished { .. } => ErrorKind::InvalidResponse,
        }
    }

    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_response(url: &str, message: impl fmt::Display) -> Self {
        Self::InvalidResponse {
            url: url.to_string(),
            message: message.to_string(),
        }
    }
}
