use crate::retry::RetryableError;
use std::time::Duration;
use thiserror::Error;

/// Every way a completion call can fail. Callers only need "text or failure";
/// the variants exist for logging and retry classification.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("gateway is not configured: {0}")]
    Config(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("could not reach the completion endpoint: {0}")]
    Network(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("completion endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed response envelope: {0}")]
    Envelope(String),
}

impl GatewayError {
    pub fn from_reqwest_error(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            GatewayError::Timeout(timeout)
        } else if error.is_connect() {
            GatewayError::Network(error.to_string())
        } else {
            GatewayError::Request(error.to_string())
        }
    }
}

impl RetryableError for GatewayError {
    fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout(_) | GatewayError::Network(_) => true,
            GatewayError::Http { status, .. } => matches!(status, 408 | 429 | 500..=599),
            GatewayError::Config(_) | GatewayError::Request(_) | GatewayError::Envelope(_) => {
                false
            }
        }
    }

    fn error_type(&self) -> String {
        match self {
            GatewayError::Config(_) => "config",
            GatewayError::Timeout(_) => "timeout",
            GatewayError::Network(_) => "network",
            GatewayError::Request(_) => "request",
            GatewayError::Http { status: 429, .. } => "rate_limit",
            GatewayError::Http { status: 500..=599, .. } => "server_error",
            GatewayError::Http { .. } => "http",
            GatewayError::Envelope(_) => "parse_error",
        }
        .to_string()
    }

    fn error_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> GatewayError {
        GatewayError::Http {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(http(503).is_retryable());
        assert!(http(429).is_retryable());
        assert!(http(408).is_retryable());
        assert!(GatewayError::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(GatewayError::Network("refused".into()).is_retryable());

        assert!(!http(400).is_retryable());
        assert!(!http(401).is_retryable());
        assert!(!GatewayError::Envelope("no candidates".into()).is_retryable());
        assert!(!GatewayError::Config("missing key".into()).is_retryable());
    }

    #[test]
    fn test_error_types() {
        assert_eq!(http(429).error_type(), "rate_limit");
        assert_eq!(http(502).error_type(), "server_error");
        assert_eq!(http(404).error_type(), "http");
    }
}
