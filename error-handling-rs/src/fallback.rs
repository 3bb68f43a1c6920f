//! # Fallback Strategies
//!
//! Graceful degradation for generators: a failed primary path is replaced by a
//! static value and the substitution stays visible to the caller.

use std::fmt;
use std::future::Future;

use serde::Serialize;
use tracing::warn;

use crate::sanitization::sanitize_message;

/// Result of a fallback operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FallbackResult<T> {
    /// The primary operation succeeded
    Primary(T),
    /// The primary operation failed and the static value was used
    Fallback(T),
}

impl<T> FallbackResult<T> {
    /// Returns true if the result used a fallback
    pub fn is_fallback(&self) -> bool {
        matches!(self, FallbackResult::Fallback(_))
    }

    /// Returns true if the result is from the primary operation
    pub fn is_primary(&self) -> bool {
        matches!(self, FallbackResult::Primary(_))
    }

    /// Gets the value regardless of source
    pub fn into_inner(self) -> T {
        match self {
            FallbackResult::Primary(value) | FallbackResult::Fallback(value) => value,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            FallbackResult::Primary(value) | FallbackResult::Fallback(value) => value,
        }
    }

    /// Maps the value while keeping its provenance
    pub fn map<U, F>(self, f: F) -> FallbackResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            FallbackResult::Primary(value) => FallbackResult::Primary(f(value)),
            FallbackResult::Fallback(value) => FallbackResult::Fallback(f(value)),
        }
    }
}

/// Runs `primary`; on error logs a warning and returns `fallback()` instead.
pub async fn with_fallback<T, E, Fut, D>(
    operation_name: &str,
    primary: Fut,
    fallback: D,
) -> FallbackResult<T>
where
    E: fmt::Display,
    Fut: Future<Output = Result<T, E>>,
    D: FnOnce() -> T,
{
    match primary.await {
        Ok(value) => FallbackResult::Primary(value),
        Err(err) => {
            warn!(
                operation = %operation_name,
                error = %sanitize_message(&err.to_string()),
                "Primary path failed, using fallback"
            );
            FallbackResult::Fallback(fallback())
        }
    }
}
