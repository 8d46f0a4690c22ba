use thiserror::Error;

/// Caller-side input problems. Raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a job description")]
    BlankJobDescription,

    #[error("Please upload at least one resume")]
    NoResumes,
}

/// Coarse classification of a [`TransportError`], handy for assertions and UI branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    NetworkError,
    UpstreamError,
    MalformedResponse,
}

/// Failure of a single submission attempt. Always terminal for that attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The request could not be sent, timed out, or the body was not JSON.
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// The proxy or backend answered with a non-2xx status.
    #[error("Server error (status {status}): {detail}")]
    UpstreamError { status: u16, detail: String },

    /// 2xx, but the payload breaks the ranking response shape or its integrity rules.
    #[error("Malformed ranking response: {reason}")]
    MalformedResponse { reason: String },
}

impl TransportError {
    pub fn kind(&self) -> TransportErrorKind {
        match self {
            TransportError::NetworkError { .. } => TransportErrorKind::NetworkError,
            TransportError::UpstreamError { .. } => TransportErrorKind::UpstreamError,
            TransportError::MalformedResponse { .. } => TransportErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TransportError::MalformedResponse {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else {
            err.to_string()
        };
        TransportError::NetworkError { message }
    }
}

/// Everything the view-model can refuse or fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("A submission is already in progress")]
    InFlight,

    #[error("Submission {0} is no longer outstanding")]
    StaleTicket(u64),
}
