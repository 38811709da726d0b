//! Error types for the bot
//!
//! `PollError` is the closed set of ways a poll cycle can fail. The poller
//! turns every variant into a single user-facing failure report.

use gradewatch_client::ClientError;
use thiserror::Error;
use tracing::error;

/// Failure of a single poll cycle
#[derive(Debug, Error)]
pub enum PollError {
    /// Grading API could not be reached or the response could not be read
    #[error("grading API unreachable: {0}")]
    Transport(#[source] ClientError),

    /// Grading API answered with something other than 200 OK
    #[error("grading API answered with status {status}")]
    ApiStatusNotOk { status: u16 },

    /// Upstream rejected the token or the `from_date` value
    #[error("token or date rejected by the grading API ({code})")]
    AuthOrDate {
        /// Value of the `code` field
        code: String,
        /// Human-readable explanation sent alongside the code, if any
        message: Option<String>,
    },

    /// Response does not have the expected shape
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// Homework record lacks a required field
    #[error("homework record has no `{0}` field")]
    MissingField(&'static str),

    /// Homework status is not one of the known codes
    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}

impl PollError {
    /// Stable tag naming the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::ApiStatusNotOk { .. } => "api_status_not_ok",
            Self::AuthOrDate { .. } => "auth_or_date",
            Self::MalformedResponse(_) => "malformed_response",
            Self::MissingField(_) => "missing_field",
            Self::UnknownStatus(_) => "unknown_status",
        }
    }

    /// Whether this failure is logged at critical severity
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::AuthOrDate { .. })
    }

    /// Emits the diagnostic log entry for this failure
    ///
    /// tracing has no level above ERROR, so critical failures are ERROR
    /// events carrying `critical = true`.
    pub fn log(&self) {
        match self {
            Self::AuthOrDate { message: Some(detail), .. } => {
                error!(critical = true, kind = self.kind(), "{}: {}", self, detail)
            }
            _ if self.is_critical() => error!(critical = true, kind = self.kind(), "{}", self),
            _ => error!(kind = self.kind(), "{}", self),
        }
    }
}

/// One or more required credentials are absent at startup
#[derive(Debug, Error)]
#[error("missing required environment variable(s): {}", .0.join(", "))]
pub struct CredentialMissing(pub Vec<&'static str>);
