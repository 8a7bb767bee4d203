// Error types: `ApiError` describes why a single HTTP call failed,
// `StageError` records which stage of the run it failed in and carries
// the process exit code for that stage.

use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one call against the tendering API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any status other than 200. The body is kept verbatim for diagnostics.
    #[error("HttpCode={}:\n{body}", .status.as_u16())]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// Terminal failure of a run. Every variant maps to its own exit code.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("API is not reachable")]
    Ping(#[source] ApiError),

    #[error("login failed")]
    Login(#[source] ApiError),

    #[error("session cookie was not set")]
    MissingCookie,

    #[error("reference catalog request failed")]
    Reference(#[source] ApiError),

    #[error("required catalog entries not found")]
    MissingReference,

    #[error("tender creation failed")]
    Create(#[source] ApiError),

    #[error("tender status check failed")]
    Status(#[source] ApiError),
}

impl StageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            StageError::Ping(_) => -1,
            StageError::Login(_) => -2,
            StageError::MissingCookie => -3,
            StageError::Reference(_) => -4,
            StageError::MissingReference => -5,
            StageError::Create(_) => -6,
            StageError::Status(_) => -7,
        }
    }

    /// Stage number (1-5) the failure belongs to.
    pub fn stage(&self) -> u8 {
        match self {
            StageError::Ping(_) => 1,
            StageError::Login(_) | StageError::MissingCookie => 2,
            StageError::Reference(_) | StageError::MissingReference => 3,
            StageError::Create(_) => 4,
            StageError::Status(_) => 5,
        }
    }

    /// Underlying call failure, if the stage failed on an HTTP call.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            StageError::Ping(e)
            | StageError::Login(e)
            | StageError::Reference(e)
            | StageError::Create(e)
            | StageError::Status(e) => Some(e),
            StageError::MissingCookie | StageError::MissingReference => None,
        }
    }
}
