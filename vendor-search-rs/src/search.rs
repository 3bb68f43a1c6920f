// vendor-search-rs/src/search.rs
// Layered vendor search
// Strategies run in order and the first one with at least one result wins:
// semantic (embedding + vector index), keyword (document store), then
// synthetic vendors from the recommendation generator.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use error_handling::{sanitize_message, Error, Result};
use llm_service::{Embedder, EventGenerator, Vendor};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::store::VendorStore;
use crate::vector_index::VectorIndex;

pub const DEFAULT_TOP_K: usize = 5;
pub const KEYWORD_LIMIT: usize = 10;
pub const KEYWORD_SCORE: f64 = 0.5;
pub const SYNTHETIC_SCORE: f64 = 0.99;
const MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    Semantic,
    Keyword,
    Synthetic,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Semantic => "semantic",
            SearchStrategy::Keyword => "keyword",
            SearchStrategy::Synthetic => "synthetic",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub vendors: Vec<Vendor>,
    pub strategy: SearchStrategy,
    /// Synthetic vendors came from the static fallback
    pub degraded: bool,
}

/// Whitespace-separated words of at least two characters, so "DJ" and "MC"
/// still count.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

pub struct VendorSearch {
    store: Arc<dyn VendorStore>,
    index: Option<Arc<dyn VectorIndex>>,
    embedder: Arc<dyn Embedder>,
    generator: EventGenerator,
    top_k: usize,
}

impl VendorSearch {
    pub fn new(
        store: Arc<dyn VendorStore>,
        index: Option<Arc<dyn VectorIndex>>,
        embedder: Arc<dyn Embedder>,
        generator: EventGenerator,
    ) -> Self {
        Self {
            store,
            index,
            embedder,
            generator,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("Query is required"));
        }

        match self.semantic(query).await {
            Ok(vendors) if !vendors.is_empty() => {
                info!(count = vendors.len(), "Semantic search matched");
                return Ok(SearchOutcome {
                    vendors,
                    strategy: SearchStrategy::Semantic,
                    degraded: false,
                });
            }
            Ok(_) => debug!("Semantic search returned no vendors"),
            Err(err) => warn!(
                error = %sanitize_message(&err.message),
                "Semantic search failed, falling back to keyword search"
            ),
        }

        let vendors = self.keyword(query).await?;
        info!(count = vendors.len(), "Keyword search finished");
        if !vendors.is_empty() {
            return Ok(SearchOutcome {
                vendors,
                strategy: SearchStrategy::Keyword,
                degraded: false,
            });
        }

        info!("No stored vendors matched, generating suggestions");
        let generated = self.generator.vendor_recommendations(query).await;
        let degraded = generated.is_fallback();
        let vendors = generated
            .into_inner()
            .into_iter()
            .map(|vendor| Vendor {
                similarity_score: Some(SYNTHETIC_SCORE),
                is_ai_generated: true,
                ..vendor
            })
            .collect();

        Ok(SearchOutcome {
            vendors,
            strategy: SearchStrategy::Synthetic,
            degraded,
        })
    }

    async fn semantic(&self, query: &str) -> Result<Vec<Vendor>> {
        let Some(index) = &self.index else {
            debug!("No vector index configured, skipping semantic search");
            return Ok(Vec::new());
        };

        let vector = self.embedder.embed(query).await?;
        let matches = index.query(&vector, self.top_k).await?;
        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let scores: HashMap<String, f64> = matches.iter().map(|m| (m.id.clone(), m.score)).collect();
        let ids: Vec<String> = matches.into_iter().map(|m| m.id).collect();

        let mut vendors: Vec<Vendor> = self
            .store
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|vendor| {
                let score = vendor
                    .id
                    .as_ref()
                    .and_then(|id| scores.get(id))
                    .copied()
                    .unwrap_or(0.0);
                Vendor {
                    similarity_score: Some(score),
                    ..vendor
                }
            })
            .collect();

        vendors.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(vendors)
    }

    async fn keyword(&self, query: &str) -> Result<Vec<Vendor>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let vendors = self.store.keyword_search(query, &tokens, KEYWORD_LIMIT).await?;
        Ok(vendors
            .into_iter()
            .map(|vendor| Vendor {
                similarity_score: Some(KEYWORD_SCORE),
                ..vendor
            })
            .collect())
    }
}
