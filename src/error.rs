// File: src/error.rs
use std::fmt;

/// Message used when the server rejects a request without saying why.
pub const REQUEST_FAILED: &str = "Request failed";

/// Everything that can go wrong talking to the shows API.
///
/// Pages never look at the variant: they surface `to_string()` in their error
/// region. The variants exist for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InvalidUrl(String),
    Transport(String),
    /// Non-2xx response. `message` is the body text, verbatim.
    Status {
        code: u16,
        message: String,
    },
    Decode(String),
    Timeout(u64),
}

impl ApiError {
    pub fn from_status(code: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            REQUEST_FAILED.to_string()
        } else {
            body.to_string()
        };
        Self::Status { code, message }
    }

    /// The user-facing message, or `fallback` when there is nothing to show.
    pub fn message_or(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            fallback.to_string()
        } else {
            msg
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl(url) => write!(f, "Invalid API URL: {}", url),
            ApiError::Transport(err) => f.write_str(err),
            ApiError::Status { message, .. } => f.write_str(message),
            ApiError::Decode(err) => write!(f, "Unexpected response from server: {}", err),
            ApiError::Timeout(secs) => write!(f, "Request timed out after {}s", secs),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
