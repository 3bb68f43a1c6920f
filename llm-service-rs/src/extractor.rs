// llm-service-rs/src/extractor.rs
//
// Pulls a JSON value out of free-form model text. Models wrap their answer in
// prose and markdown fences, so the first balanced object/array that parses
// wins.

use std::fmt;

use error_handling::Error;
use serde_json::Value;
use thiserror::Error as ThisError;

/// Bracket kind the caller expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn delimiters(self) -> (u8, u8) {
        match self {
            JsonShape::Object => (b'{', b'}'),
            JsonShape::Array => (b'[', b']'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            JsonShape::Object => value.is_object(),
            JsonShape::Array => value.is_array(),
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonShape::Object => write!(f, "object"),
            JsonShape::Array => write!(f, "array"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ExtractionError {
    #[error("model response was empty")]
    Empty,
    #[error("no valid JSON {0} found in model response")]
    NotFound(JsonShape),
}

impl From<ExtractionError> for Error {
    fn from(err: ExtractionError) -> Self {
        Error::extraction(err.to_string())
    }
}

/// Removes markdown code fences (```json and ```), then trims.
pub fn strip_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Extracts the first JSON value of the requested shape from `text`.
///
/// Scans for an opening bracket, finds its balanced closing bracket while
/// skipping string contents, and parses that span. A span that fails to parse
/// is skipped whole (nested brackets included) and the scan resumes after it.
pub fn extract_json(text: &str, shape: JsonShape) -> Result<Value, ExtractionError> {
    let cleaned = strip_fences(text);
    if cleaned.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let (open, close) = shape.delimiters();
    let bytes = cleaned.as_bytes();
    let mut from = 0;

    while let Some(offset) = bytes[from..].iter().position(|&b| b == open) {
        let start = from + offset;
        match balanced_span(&bytes[start..], open, close) {
            Some(len) => {
                // Brackets are ASCII, so both ends sit on char boundaries
                let candidate = &cleaned[start..start + len];
                if let Ok(value) = serde_json::from_str::<Value>(candidate) {
                    if shape.matches(&value) {
                        return Ok(value);
                    }
                }
                // A broken span's children are fragments, never the answer
                from = start + len;
            }
            None => from = start + 1,
        }
    }

    Err(ExtractionError::NotFound(shape))
}

// Length of the span starting at bytes[0] (an opening bracket) up to and
// including its matching close, or None if it never closes.
fn balanced_span(bytes: &[u8], open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        if b == b'"' {
            in_string = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i + 1);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_with_prose_and_fences() {
        let text = "Sure! Here is the theme:\n```json\n{\"atmosphere\": \"cozy\", \"decorElements\": [\"candles\"]}\n```\nEnjoy!";
        let value = extract_json(text, JsonShape::Object).unwrap();
        assert_eq!(value, json!({"atmosphere": "cozy", "decorElements": ["candles"]}));
    }

    #[test]
    fn test_array_with_nested_objects() {
        let text = "Schedule below\n[{\"time\": \"09:00 AM\", \"notes\": \"bring [badges]\"}, {\"time\": \"10:00 AM\"}] done";
        let value = extract_json(text, JsonShape::Array).unwrap();
        assert_eq!(
            value,
            json!([{"time": "09:00 AM", "notes": "bring [badges]"}, {"time": "10:00 AM"}])
        );
    }

    #[test]
    fn test_two_objects_returns_first() {
        let text = "{\"a\": 1} and also {\"b\": 2}";
        assert_eq!(extract_json(text, JsonShape::Object).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_skips_unparsable_span() {
        let text = "Options [a, b] follow: [1, 2, 3]";
        assert_eq!(extract_json(text, JsonShape::Array).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_malformed_span_does_not_yield_nested_object() {
        let text = r#"{"a": [1, 2,], "b": {"c": 1}}"#;
        assert_eq!(
            extract_json(text, JsonShape::Object),
            Err(ExtractionError::NotFound(JsonShape::Object))
        );

        let text = r#"{"a": [1,], "b": {"c": 1}} then {"d": 2}"#;
        assert_eq!(extract_json(text, JsonShape::Object).unwrap(), json!({"d": 2}));
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let text = r#"{"summary": "closing } brace and \"quoted { text\"", "riskLevel": "low"}"#;
        let value = extract_json(text, JsonShape::Object).unwrap();
        assert_eq!(value["riskLevel"], "low");
    }

    #[test]
    fn test_missing_json() {
        assert_eq!(
            extract_json("I cannot help with that.", JsonShape::Array),
            Err(ExtractionError::NotFound(JsonShape::Array))
        );
        assert_eq!(extract_json("```json\n```", JsonShape::Object), Err(ExtractionError::Empty));
        assert_eq!(
            extract_json("{\"unterminated\": true", JsonShape::Object),
            Err(ExtractionError::NotFound(JsonShape::Object))
        );
    }
}
