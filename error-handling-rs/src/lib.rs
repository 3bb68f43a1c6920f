//! # Error Handling Framework
//!
//! Shared error handling for the event planner services:
//!
//! - `types`: the error taxonomy for outbound calls and rate-limit classification
//! - `retry`: bounded retries with capped exponential backoff
//! - `fallback`: primary/fallback results for graceful degradation
//! - `logging`: tracing subscriber setup
//! - `sanitization`: credential redaction for error text

pub mod fallback;
pub mod logging;
pub mod retry;
pub mod sanitization;
pub mod types;

// Re-export commonly used types
pub use fallback::{with_fallback, FallbackResult};
pub use logging::{init_logging, LoggingConfig};
pub use retry::{RetryConfig, RetryPolicy, RetryResult, RetryableError};
pub use sanitization::sanitize_message;
pub use types::{Error, ErrorKind, Result};
