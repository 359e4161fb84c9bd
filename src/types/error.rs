// src/types/error.rs
use thiserror::Error;

/// Failure of a call against the ATS API.
///
/// The UI never distinguishes the variants: every one of them ends up as a
/// single message string at the operation boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response. `message` is the response body, or `HTTP <status>`.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// A response body that could not be read, or a 2xx body that is not
    /// the expected JSON.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP {}", status)
        } else {
            body.to_string()
        };
        ApiError::Request { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_uses_body_text() {
        let err = ApiError::from_status(500, "boom");
        assert_eq!(err.to_string(), "boom");
        assert!(matches!(err, ApiError::Request { status: 500, .. }));
    }

    #[test]
    fn test_request_error_empty_body_falls_back_to_status() {
        assert_eq!(ApiError::from_status(404, "").to_string(), "HTTP 404");
        assert_eq!(ApiError::from_status(502, "  \n").to_string(), "HTTP 502");
    }
}
