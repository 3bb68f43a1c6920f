// llm-service-rs/src/provider.rs
//
// Seams between the generators and whatever produces text or vectors.
// `GeminiClient` implements both; tests plug in the fakes from `test_support`.

use async_trait::async_trait;
use error_handling::Result;

/// Produces free-form model text for a prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String>;
}

/// Produces an embedding vector for a piece of text
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
