//! # Standardized Error Types
//!
//! Error taxonomy shared by every outbound call in the event planner.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A type alias for Result with the error type defaulting to our Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

// Upstream messages that signal throttling even without a 429 status
static QUOTA_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)quota|please retry").unwrap());

// "Please retry in 31.2s." style hints embedded in upstream messages
static RETRY_IN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)retry in\s*([0-9]+(?:\.[0-9]+)?)\s*s").unwrap());

/// Categorizes different kinds of errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Connect, timeout, DNS or other request-level failure
    Transport,
    /// Upstream throttling (429 or a quota message)
    Throttle,
    /// Upstream 5xx
    Upstream,
    /// Upstream 4xx that will not succeed on retry
    Rejected,
    /// The response arrived but did not contain what we asked for
    Extraction,
    /// Bad input from our own caller
    Validation,
    /// Missing or invalid configuration
    Configuration,
    /// Anything else
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport Error"),
            ErrorKind::Throttle => write!(f, "Rate Limit Error"),
            ErrorKind::Upstream => write!(f, "Upstream Service Error"),
            ErrorKind::Rejected => write!(f, "Rejected Request"),
            ErrorKind::Extraction => write!(f, "Extraction Error"),
            ErrorKind::Validation => write!(f, "Validation Error"),
            ErrorKind::Configuration => write!(f, "Configuration Error"),
            ErrorKind::Internal => write!(f, "Internal Error"),
        }
    }
}

/// Classified failure of a remote call or a step around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    /// HTTP status of the upstream response, when one was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Seconds from a `Retry-After` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl Error {
    /// Creates a new error with the specified kind and message
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retry_after: None,
        }
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn extraction<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Extraction, message)
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Classifies a non-2xx upstream response.
    ///
    /// 429 and quota messages are throttling, 5xx is an upstream fault, every
    /// other status is a rejection.
    pub fn from_status<S: Into<String>>(status: u16, message: S) -> Self {
        let message = message.into();
        let kind = match status {
            429 => ErrorKind::Throttle,
            500..=599 => ErrorKind::Upstream,
            _ if QUOTA_PATTERN.is_match(&message) => ErrorKind::Throttle,
            _ => ErrorKind::Rejected,
        };
        Self {
            kind,
            message,
            status: Some(status),
            retry_after: None,
        }
    }

    /// Attaches a `Retry-After` value in seconds
    pub fn with_retry_after(mut self, seconds: Option<u64>) -> Self {
        self.retry_after = seconds;
        self
    }

    /// Returns true if this error is transient and might succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Transport | ErrorKind::Throttle | ErrorKind::Upstream
        ) || QUOTA_PATTERN.is_match(&self.message)
    }

    /// Returns true if the upstream is telling us to slow down
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(429)
            || self.kind == ErrorKind::Throttle
            || QUOTA_PATTERN.is_match(&self.message)
    }

    /// Seconds the client should wait: the header value if we saw one,
    /// otherwise a `retry in <N>s` phrase in the message rounded up.
    pub fn retry_after_hint(&self) -> Option<u64> {
        self.retry_after.or_else(|| {
            RETRY_IN_PATTERN
                .captures(&self.message)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map(|secs| secs.ceil() as u64)
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(status) = self.status {
            write!(f, " (Status: {})", status)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string
        let err = err.without_url();
        match err.status() {
            Some(status) if !(err.is_timeout() || err.is_connect()) => {
                Self::from_status(status.as_u16(), format!("HTTP request error: {}", err))
            }
            _ => Self::transport(format!("HTTP request error: {}", err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::extraction(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(Error::from_status(429, "slow down").kind, ErrorKind::Throttle);
        assert_eq!(Error::from_status(503, "unavailable").kind, ErrorKind::Upstream);
        assert_eq!(Error::from_status(400, "bad request").kind, ErrorKind::Rejected);
        assert_eq!(
            Error::from_status(400, "Quota exceeded for metric").kind,
            ErrorKind::Throttle
        );
    }

    #[test]
    fn test_transient_errors() {
        assert!(Error::transport("connection refused").is_transient());
        assert!(Error::from_status(500, "boom").is_transient());
        assert!(Error::from_status(429, "slow down").is_transient());
        assert!(!Error::from_status(404, "not found").is_transient());
        assert!(!Error::extraction("no json").is_transient());
        // message match wins regardless of kind
        assert!(Error::internal("Please retry later").is_transient());
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(Error::from_status(429, "Too many requests").is_rate_limited());
        assert!(Error::internal("You exceeded your current quota").is_rate_limited());
        assert!(!Error::from_status(500, "boom").is_rate_limited());
        assert!(!Error::transport("timed out").is_rate_limited());
    }

    #[test]
    fn test_retry_after_hint() {
        let header = Error::from_status(429, "Please retry in 12.5s").with_retry_after(Some(30));
        assert_eq!(header.retry_after_hint(), Some(30));

        let parsed = Error::from_status(429, "Quota exceeded. Please retry in 12.5s.");
        assert_eq!(parsed.retry_after_hint(), Some(13));

        let whole = Error::from_status(429, "retry in 7s");
        assert_eq!(whole.retry_after_hint(), Some(7));

        assert_eq!(Error::from_status(429, "slow down").retry_after_hint(), None);
    }

    #[test]
    fn test_error_display() {
        let err = Error::from_status(503, "Service overloaded");
        let display = format!("{}", err);
        assert!(display.contains("Upstream Service Error"));
        assert!(display.contains("Service overloaded"));
        assert!(display.contains("Status: 503"));
    }
}
