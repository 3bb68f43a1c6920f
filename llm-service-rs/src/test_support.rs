// llm-service-rs/src/test_support.rs
//
// In-process stand-ins for the model provider, shared with the other crates'
// tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use error_handling::{Error, Result};
use tokio::sync::Mutex;

use crate::provider::{Embedder, TextGenerator};

/// Replays queued responses in order; once the queue is empty every call
/// returns the configured fallthrough response.
pub struct ScriptedTextGenerator {
    responses: Mutex<VecDeque<Result<String>>>,
    fallthrough: Result<String>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedTextGenerator {
    pub fn new<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<String>>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            fallthrough: Err(Error::internal("no scripted response left")),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with `text`
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            fallthrough: Ok(text.into()),
            ..Self::new(Vec::new())
        }
    }

    /// Always fails with `error`
    pub fn failing(error: Error) -> Self {
        Self {
            fallthrough: Err(error),
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());

        match self.responses.lock().await.pop_front() {
            Some(response) => response,
            None => self.fallthrough.clone(),
        }
    }
}

/// Returns a fixed vector for every input, or a fixed error.
pub struct StaticEmbedder {
    result: Result<Vec<f32>>,
    calls: AtomicUsize,
}

impl StaticEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        Self {
            result: Ok(vector),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: Error) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
