//! Shared error type across the dead code crates.

use thiserror::Error;

/// Stable error categories, used for logs and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// One protocol line could not be decoded.
    MalformedLine,
    /// Transient I/O failure (receive, save).
    Io,
    /// Persisted snapshot exists but cannot be decoded.
    CorruptSnapshot,
    /// Invalid configuration.
    BadConfig,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MalformedLine => "MALFORMED_LINE",
            ErrorKind::Io => "IO",
            ErrorKind::CorruptSnapshot => "CORRUPT_SNAPSHOT",
            ErrorKind::BadConfig => "BAD_CONFIG",
            ErrorKind::Internal => "INTERNAL",
        }
    }

    /// Whether the process must refuse to start on this error.
    pub fn is_fatal(self) -> bool {
        matches!(self, ErrorKind::CorruptSnapshot | ErrorKind::BadConfig)
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DeadCodeError>;

/// Unified error type used by core and collector.
#[derive(Debug, Error)]
pub enum DeadCodeError {
    #[error("malformed line: {0}")]
    MalformedLine(String),
    #[error("io: {0}")]
    Io(String),
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl DeadCodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeadCodeError::MalformedLine(_) => ErrorKind::MalformedLine,
            DeadCodeError::Io(_) => ErrorKind::Io,
            DeadCodeError::CorruptSnapshot(_) => ErrorKind::CorruptSnapshot,
            DeadCodeError::BadConfig(_) => ErrorKind::BadConfig,
            DeadCodeError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<std::io::Error> for DeadCodeError {
    fn from(e: std::io::Error) -> Self {
        DeadCodeError::Io(e.to_string())
    }
}
