//! Error types for the Gradewatch clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the grading API or Telegram
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code or refused the request
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::api_error(401, "Unauthorized");
        assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
        assert_eq!(err.to_string(), "API error (status 401): Unauthorized");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ClientError::ParseError("expected value".to_string());
        assert_eq!(err.to_string(), "Failed to parse response: expected value");
    }
}
