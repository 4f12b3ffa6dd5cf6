use std::fmt;

use serde::{Deserialize, Serialize};

/// Categories of API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Final response was not 2xx
    HttpStatus,
    /// Connection, TLS or timeout failure before a response arrived
    Transport,
    /// Response body was not the expected JSON
    Parse,
    /// The token refresh after a 401 could not be completed
    Refresh,
    /// Tokens could not be written to the token store
    Storage,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Parse => write!(f, "parse"),
            ApiErrorKind::Refresh => write!(f, "refresh"),
            ApiErrorKind::Storage => write!(f, "storage"),
        }
    }
}

/// Error returned by every [`super::ApiClient`] call.
///
/// Messages stay generic ("Failed to fetch /notes"); the status code and the
/// underlying cause are kept alongside for callers that want them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// HTTP status of the final response, when one was received
    pub status: Option<u16>,
    /// Underlying cause (transport error text, parse error, response body)
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    pub fn http_status(message: impl Into<String>, status: u16, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::HttpStatus,
            message: message.into(),
            status: Some(status),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn transport(message: impl Into<String>, err: &reqwest::Error) -> Self {
        Self::new(ApiErrorKind::Transport, message).with_details(err.to_string())
    }

    pub fn parse(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message).with_details(details)
    }

    pub fn refresh(details: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Refresh, "Failed to refresh token").with_details(details)
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// True when the server rejected the credentials even after a refresh.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// True for a 404 on the final response.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_when_present() {
        let err = ApiError::http_status("Failed to fetch /notes", 500, "");
        assert_eq!(err.to_string(), "Failed to fetch /notes (HTTP 500)");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_refresh_error_is_generic() {
        let err = ApiError::refresh("No refresh token found");
        assert_eq!(err.kind, ApiErrorKind::Refresh);
        assert_eq!(err.to_string(), "Failed to refresh token");
        assert_eq!(err.details.as_deref(), Some("No refresh token found"));
    }

    #[test]
    fn test_status_predicates() {
        assert!(ApiError::http_status("x", 401, "").is_unauthorized());
        assert!(ApiError::http_status("x", 404, "").is_not_found());
        assert!(!ApiError::new(ApiErrorKind::Transport, "x").is_not_found());
    }
}
