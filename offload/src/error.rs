//! Error types for the `offload` layer.
use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

/// Top-level offload error type.
/// The `error_kind` tells the `web` layer which HTTP status to answer with, while
/// `source` keeps the lower level error (a parse failure, a join error) around for logging.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: OffloadErrorKind,
}

/// The kinds of failure an offload request can end in.
#[derive(Debug, PartialEq)]
pub enum OffloadErrorKind {
    /// The numeric parameter was missing, negative or not a number. A caller error.
    InvalidArgument(String),
    /// The isolated computation panicked or its worker went away before reporting.
    WorkerFailure(String),
    /// The worker did not report back within the configured timeout.
    WorkerTimeout(Duration),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: OffloadErrorKind::InvalidArgument(message.into()),
        }
    }

    pub fn worker_failure(message: impl Into<String>) -> Self {
        Error {
            source: None,
            error_kind: OffloadErrorKind::WorkerFailure(message.into()),
        }
    }

    pub fn worker_timeout(after: Duration) -> Self {
        Error {
            source: None,
            error_kind: OffloadErrorKind::WorkerTimeout(after),
        }
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for OffloadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OffloadErrorKind::InvalidArgument(message) => write!(f, "Invalid argument: {message}"),
            OffloadErrorKind::WorkerFailure(message) => write!(f, "Worker failure: {message}"),
            OffloadErrorKind::WorkerTimeout(after) => {
                write!(f, "Worker timed out after {}s", after.as_secs_f64())
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Offload Error: {}", self.error_kind)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// A worker that panicked or was cancelled by the runtime is reported as a worker failure.
impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        let message = if err.is_panic() {
            "worker panicked".to_string()
        } else {
            "worker was cancelled before reporting".to_string()
        };

        Error::worker_failure(message).with_source(err)
    }
}
