//! # Error Sanitization
//!
//! Strips credentials from error text before it reaches a log line or a
//! response body.

use once_cell::sync::Lazy;
use regex::Regex;

const REDACTED: &str = "[REDACTED]";

// Static regex patterns for sensitive information detection
static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Query-string keys (?key=..., &api_key=...)
        Regex::new(r"(?i)([?&](?:api[_-]?)?key=)[^&\s\x22']+").unwrap(),
        // API keys, tokens, credentials in key/value form
        Regex::new(r#"(?i)((?:api[_-]?key|token|secret|password)["']?\s*[=:]\s*["']?)[^"'\s&,]+"#)
            .unwrap(),
        // OAuth 2.0 tokens
        Regex::new(r"(?i)(bearer\s+)[a-z0-9._\-]+").unwrap(),
        // Google API keys
        Regex::new(r"()AIza[0-9A-Za-z_\-]{20,}").unwrap(),
    ]
});

/// Redacts credentials from a free-form message
pub fn sanitize_message(message: &str) -> String {
    let mut sanitized = message.to_string();
    for pattern in SENSITIVE_PATTERNS.iter() {
        sanitized = pattern
            .replace_all(&sanitized, format!("${{1}}{}", REDACTED).as_str())
            .into_owned();
    }
    sanitized
}
