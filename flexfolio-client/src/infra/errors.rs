//! Profile API error types
//!
//! Every failure the pages can observe is one of three kinds. The `Display`
//! output is what ends up in front of the user.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a read or write against the profile API failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// Any non-2xx response; 4xx and 5xx are not told apart.
    #[error("server responded with {0}")]
    Status(StatusCode),

    #[error("network error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    /// The body was not a well-formed record of the expected shape.
    #[error("unexpected response: {0}")]
    SchemaMismatch(String),
}

/// Main profile API error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Failed to fetch profile ({reason})")]
    FetchFailure { reason: FailureReason },

    #[error("Failed to update profile ({reason})")]
    UpdateFailure { reason: FailureReason },

    /// A write was attempted without a usable credential.
    #[error("No session found, please sign in again")]
    NoSession,
}

impl ProfileError {
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            ProfileError::FetchFailure { reason }
            | ProfileError::UpdateFailure { reason } => Some(reason),
            ProfileError::NoSession => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProfileError::FetchFailure {
                reason: FailureReason::Status(StatusCode::NOT_FOUND)
            }
        )
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self.reason(), Some(FailureReason::SchemaMismatch(_)))
    }
}

impl FailureReason {
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FailureReason::Timeout
        } else if err.is_decode() {
            FailureReason::SchemaMismatch(err.to_string())
        } else {
            FailureReason::Transport(err.to_string())
        }
    }
}
