//! Tests for the LLM service
//!
//! HTTP behaviour of the Gemini client runs against a wiremock server; the
//! generators run against the in-process fakes from `test_support`.

pub mod generator_tests;
