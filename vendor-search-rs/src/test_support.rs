// vendor-search-rs/src/test_support.rs
// In-process vector indexes for tests in this and dependent crates.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use error_handling::{Error, Result};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::vector_index::{VectorIndex, VectorMatch, VectorRecord};

/// Brute-force cosine index
#[derive(Default)]
pub struct InMemoryVectorIndex {
    records: RwLock<Vec<VectorRecord>>,
    queries: AtomicUsize,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read().await;

        let mut scored: Vec<VectorMatch> = records
            .iter()
            .map(|r| VectorMatch {
                id: r.id.clone(),
                score: cosine_similarity(vector, &r.values) as f64,
                metadata: Some(r.metadata.clone()),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn upsert(&self, new_records: Vec<VectorRecord>) -> Result<()> {
        let mut records = self.records.write().await;
        for record in new_records {
            records.retain(|r| r.id != record.id);
            records.push(record);
        }
        Ok(())
    }

    async fn describe_stats(&self) -> Result<Value> {
        Ok(json!({ "totalVectorCount": self.records.read().await.len() }))
    }
}

/// Index with fixed query results, or one that always fails
pub struct FixedVectorIndex {
    result: Result<Vec<VectorMatch>>,
    queries: AtomicUsize,
}

impl FixedVectorIndex {
    pub fn returning(matches: Vec<VectorMatch>) -> Self {
        Self {
            result: Ok(matches),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: Error) -> Self {
        Self {
            result: Err(error),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VectorIndex for FixedVectorIndex {
    async fn query(&self, _vector: &[f32], top_k: usize) -> Result<Vec<VectorMatch>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map(|matches| matches.into_iter().take(top_k).collect())
    }

    async fn upsert(&self, _records: Vec<VectorRecord>) -> Result<()> {
        self.result.clone().map(|_| ())
    }

    async fn describe_stats(&self) -> Result<Value> {
        self.result
            .clone()
            .map(|matches| json!({ "totalVectorCount": matches.len() }))
    }
}
