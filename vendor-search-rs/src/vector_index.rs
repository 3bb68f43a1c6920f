// vendor-search-rs/src/vector_index.rs
// Vector index integration
// Talks to a Pinecone-compatible data plane over REST (`/query`,
// `/vectors/upsert`, `/describe_index_stats`).

use std::time::Duration;

use async_trait::async_trait;
use config_rs::VectorIndexConfig;
use error_handling::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Value,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Nearest neighbours of `vector`, best first
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>>;

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<()>;

    /// Raw index statistics as reported by the index
    async fn describe_stats(&self) -> Result<Value>;
}

/// Total vector count from a stats document, whichever name the index uses.
pub fn total_vector_count(stats: &Value) -> u64 {
    ["totalVectorCount", "totalRecordCount"]
        .iter()
        .find_map(|key| stats.get(*key).and_then(Value::as_u64))
        .unwrap_or(0)
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<VectorMatch>,
}

pub struct PineconeIndex {
    http: Client,
    config: VectorIndexConfig,
}

impl PineconeIndex {
    pub fn new(config: VectorIndexConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn top_k(&self) -> usize {
        self.config.top_k
    }

    async fn post(&self, route: &str, body: &Value) -> Result<Value> {
        let url = format!("{}/{}", self.config.host, route);
        let response = self
            .http
            .post(&url)
            .header("Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .unwrap_or_else(|_| Value::Object(Default::default()));

        if !status.is_success() {
            let message = body
                .get("message")
                .or_else(|| body.pointer("/error/message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Vector index error: {}", status.as_u16()));
            return Err(Error::from_status(status.as_u16(), message));
        }

        debug!(route, status = status.as_u16(), "Vector index request succeeded");
        Ok(body)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
        let body = self
            .post(
                "query",
                &json!({
                    "vector": vector,
                    "topK": top_k,
                    "includeMetadata": true,
                    "includeValues": false
                }),
            )
            .await?;

        let response: QueryResponse = serde_json::from_value(body)?;
        Ok(response.matches)
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<()> {
        self.post("vectors/upsert", &json!({ "vectors": records })).await?;
        Ok(())
    }

    async fn describe_stats(&self) -> Result<Value> {
        self.post("describe_index_stats", &json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_vector_count() {
        assert_eq!(total_vector_count(&json!({"totalVectorCount": 12})), 12);
        assert_eq!(total_vector_count(&json!({"totalRecordCount": 3})), 3);
        assert_eq!(total_vector_count(&json!({"dimension": 768})), 0);
    }
}
