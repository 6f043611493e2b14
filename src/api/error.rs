//! Errors returned by the backend API client.

use reqwest::StatusCode;

/// Failure of a single backend request.
///
/// `detail` carries the server's own explanation (FastAPI's `detail` field)
/// when the response had one.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No response at all (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// 401/403 - missing or expired session
    #[error("Not authorized{}", fmt_detail(detail))]
    Unauthorized { detail: Option<String> },

    /// 400/422 - malformed request, e.g. an empty query
    #[error("Invalid request{}", fmt_detail(detail))]
    Validation { detail: Option<String> },

    /// Any other non-2xx status
    #[error("Server returned HTTP {status}{}", fmt_detail(detail))]
    Server { status: u16, detail: Option<String> },

    /// 2xx response whose body didn't match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

fn fmt_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

impl ApiError {
    /// Classify a non-success status with the detail extracted from its body.
    pub fn from_status(status: StatusCode, detail: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized { detail },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Validation { detail }
            }
            _ => Self::Server {
                status: status.as_u16(),
                detail,
            },
        }
    }

    /// The server-provided explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail }
            | Self::Validation { detail }
            | Self::Server { detail, .. } => detail.as_deref(),
            Self::Network(_) | Self::Parse(_) => None,
        }
    }

    /// The message shown to the user: the server detail, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, None),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, None),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, None),
            ApiError::Validation { .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, None),
            ApiError::Server { status: 404, .. }
        ));
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            Some("Incorrect email or password".to_string()),
        );
        assert_eq!(err.user_message("Login failed"), "Incorrect email or password");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(err.user_message("Signup failed"), "Signup failed");
    }

    #[test]
    fn test_display_includes_detail() {
        let err = ApiError::Server {
            status: 500,
            detail: Some("boom".to_string()),
        };
        assert_eq!(err.to_string(), "Server returned HTTP 500: boom");
        let err = ApiError::Unauthorized { detail: None };
        assert_eq!(err.to_string(), "Not authorized");
    }
}
