//! Error types shared across the brokkr workspace

use serde::Serialize;
use thiserror::Error;

/// Result type alias using brokkr-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Machine-checkable classification of an error.
///
/// Every operation surfaces exactly one of these kinds so callers can
/// pattern-match instead of inspecting message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No credential configured at all
    Unauthenticated,
    /// Credential present but rejected, or input failed validation provider-side
    Invalid,
    /// Name collision, stale revision marker, or duplicate resource
    Conflict,
    /// Repository, template, file, or portfolio entry does not exist
    NotFound,
    /// Provider quota exhausted
    RateLimited,
    /// Clone/pull transport failure
    DeployFailed,
    /// Multi-step workflow succeeded partially
    PartialFailure,
    /// Missing or malformed caller input
    Validation,
    /// Malformed or unanticipated provider response, or local fault
    Unexpected,
}

/// Provisioning error types
#[derive(Error, Debug)]
pub enum Error {
    /// No GitHub token configured
    #[error("GitHub token not configured")]
    Unauthenticated,

    /// Credential or input rejected by the provider or local validation
    #[error("{message}")]
    Invalid { message: String },

    /// Name collision or stale revision marker
    #[error("{message}")]
    Conflict { message: String },

    /// Requested resource does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Provider reported an exhausted quota
    #[error("GitHub API rate limit exceeded. Try again later.")]
    RateLimited,

    /// Git transport failure during clone or pull
    #[error("Deploy failed: {message}")]
    DeployFailed { message: String },

    /// A multi-step workflow stopped partway; the completed steps are listed
    #[error("{message} (completed: {completed:?})")]
    PartialFailure {
        message: String,
        completed: Vec<String>,
    },

    /// Missing or malformed caller input
    #[error("{message}")]
    Validation { message: String },

    /// Malformed or unanticipated provider response
    #[error("Unexpected provider response: {message}")]
    Unexpected { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid-credential/input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a deploy-failed error
    pub fn deploy_failed(message: impl Into<String>) -> Self {
        Self::DeployFailed {
            message: message.into(),
        }
    }

    /// Create a partial-failure error listing the steps that did complete
    pub fn partial_failure(message: impl Into<String>, completed: Vec<String>) -> Self {
        Self::PartialFailure {
            message: message.into(),
            completed,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unexpected-response error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthenticated => ErrorKind::Unauthenticated,
            Error::Invalid { .. } => ErrorKind::Invalid,
            Error::Conflict { .. } => ErrorKind::Conflict,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::RateLimited => ErrorKind::RateLimited,
            Error::DeployFailed { .. } => ErrorKind::DeployFailed,
            Error::PartialFailure { .. } => ErrorKind::PartialFailure,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Unexpected { .. } | Error::Io(_) | Error::JsonParse(_) => ErrorKind::Unexpected,
        }
    }

    /// HTTP status equivalent for the JSON error surface.
    ///
    /// Auth failures and rate limiting share 401/403; the payload kind
    /// distinguishes them.
    pub fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Unauthenticated | ErrorKind::Invalid => 401,
            ErrorKind::RateLimited => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::DeployFailed | ErrorKind::PartialFailure | ErrorKind::Unexpected => 500,
        }
    }

    /// Serializable form for the JSON boundary
    pub fn to_api(&self) -> ApiError {
        ApiError {
            error: self.to_string(),
            kind: self.kind(),
        }
    }
}

/// JSON error payload handed to the consuming layer
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub error: String,
    pub kind: ErrorKind,
}
