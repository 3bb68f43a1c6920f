// llm-service-rs/src/gemini_client.rs
//
// HTTP client for the Gemini REST API (text generation + embeddings)
//
// This module provides:
// - Real HTTP calls to `generateContent` and `embedContent` via reqwest
// - Bounded retries with capped exponential backoff (error_handling::RetryPolicy)
// - Classification of every failure into the shared error taxonomy
//
// The API key travels in the `key` query parameter. reqwest errors are stripped
// of their URL before they are turned into messages, so the key never reaches
// a log line or a response body.

use std::time::Duration;

use async_trait::async_trait;
use config_rs::AiConfig;
use error_handling::{Error, Result, RetryConfig, RetryPolicy, RetryResult};
use reqwest::{header::RETRY_AFTER, Client, Response};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::provider::{Embedder, TextGenerator};

/// Base delay used for embedding retries
const EMBEDDING_BASE_DELAY_MS: u64 = 500;

/// Outcome of a remote call after the retry budget is spent
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCallOutcome {
    /// Parsed JSON body of a 2xx response
    Success(Value),
    /// Final classified failure
    Failure(Error),
}

impl RemoteCallOutcome {
    pub fn into_result(self) -> Result<Value> {
        match self {
            RemoteCallOutcome::Success(body) => Ok(body),
            RemoteCallOutcome::Failure(err) => Err(err),
        }
    }
}

impl From<RetryResult<Value>> for RemoteCallOutcome {
    fn from(result: RetryResult<Value>) -> Self {
        match result {
            RetryResult::Success(body) => RemoteCallOutcome::Success(body),
            RetryResult::Failure(err) => RemoteCallOutcome::Failure(err),
        }
    }
}

pub struct GeminiClient {
    http: Client,
    config: AiConfig,
    text_policy: RetryPolicy,
    embedding_policy: RetryPolicy,
}

impl GeminiClient {
    /// Creates a client from explicit configuration.
    pub fn new(config: AiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        let text_policy = RetryPolicy::new(
            "gemini-text",
            Some(Self::retry_config(&config, config.initial_retry_delay_ms)),
        );
        let embedding_policy = RetryPolicy::new(
            "gemini-embedding",
            Some(Self::retry_config(&config, EMBEDDING_BASE_DELAY_MS)),
        );

        info!(
            base_url = %config.base_url,
            text_model = %config.text_model,
            embedding_model = %config.embedding_model,
            max_retries = config.max_retries,
            "Gemini client ready"
        );

        Ok(Self {
            http,
            config,
            text_policy,
            embedding_policy,
        })
    }

    fn retry_config(config: &AiConfig, base_delay_ms: u64) -> RetryConfig {
        RetryConfig {
            max_retries: config.max_retries,
            base_backoff: Duration::from_millis(base_delay_ms),
            max_backoff: Duration::from_millis(config.max_retry_delay_ms),
            network_max_backoff: Duration::from_millis(config.network_max_retry_delay_ms),
        }
    }

    /// Check if the client has a key to call with
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn endpoint_url(&self, model: &str, action: &str) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            model,
            action
        )
    }

    /// POSTs `payload` to `models/{model}:{action}` under the given policy.
    pub async fn call(
        &self,
        model: &str,
        action: &str,
        payload: &Value,
        policy: &RetryPolicy,
    ) -> RemoteCallOutcome {
        if !self.is_configured() {
            return RemoteCallOutcome::Failure(Error::configuration("GEMINI_API_KEY is missing"));
        }

        let url = self.endpoint_url(model, action);
        let url = url.as_str();
        let operation = format!("{}:{}", model, action);

        policy
            .retry(&operation, move || self.attempt_once(url, payload))
            .await
            .into()
    }

    // Execute a single request attempt
    async fn attempt_once(&self, url: &str, payload: &Value) -> Result<Value> {
        let response = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(payload)
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Gemini request succeeded");
            return Ok(read_body(response).await);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let body = read_body(response).await;
        let message = body
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("API error: {}", status.as_u16()));

        Err(Error::from_status(status.as_u16(), message).with_retry_after(retry_after))
    }
}

// An unreadable body is treated as an empty object, never as a transport error.
async fn read_body(response: Response) -> Value {
    response
        .json::<Value>()
        .await
        .unwrap_or_else(|_| Value::Object(Default::default()))
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let body = self
            .call(&self.config.text_model, "generateContent", &payload, &self.text_policy)
            .await
            .into_result()?;

        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::extraction("Response did not contain candidate text"))
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let payload = json!({
            "content": { "parts": [{ "text": text }] }
        });

        let body = self
            .call(
                &self.config.embedding_model,
                "embedContent",
                &payload,
                &self.embedding_policy,
            )
            .await
            .into_result()?;

        let values = body
            .pointer("/embedding/values")
            .cloned()
            .ok_or_else(|| Error::extraction("Response did not contain embedding values"))?;

        serde_json::from_value::<Vec<f32>>(values).map_err(Error::from)
    }
}
