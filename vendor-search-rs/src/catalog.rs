// vendor-search-rs/src/catalog.rs
// Vendor catalog operations: listing, creation, seeding and the debug views.
// Every stored vendor is also embedded into the vector index when one is
// configured; embedding failures are logged and never fail the write.

use std::sync::Arc;

use error_handling::{sanitize_message, Error, Result};
use llm_service::{Embedder, Vendor};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::seed::sample_vendors;
use crate::store::{StoreStats, VendorStore};
use crate::vector_index::{total_vector_count, VectorIndex, VectorRecord};

/// Dimension of the probe vector used to sample the index
pub const PROBE_DIMENSIONS: usize = 768;
const PROBE_VALUE: f32 = 0.1;
const PROBE_TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedDetail {
    pub name: String,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedReport {
    pub message: String,
    pub count: usize,
    pub details: Vec<SeedDetail>,
}

pub struct VendorCatalog {
    store: Arc<dyn VendorStore>,
    index: Option<Arc<dyn VectorIndex>>,
    embedder: Arc<dyn Embedder>,
}

impl VendorCatalog {
    pub fn new(
        store: Arc<dyn VendorStore>,
        index: Option<Arc<dyn VectorIndex>>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            store,
            index,
            embedder,
        }
    }

    pub async fn list(&self) -> Result<Vec<Vendor>> {
        let vendors = self.store.list().await?;
        info!(count = vendors.len(), "Fetched vendors");
        Ok(vendors)
    }

    /// Stores a vendor and embeds it; returns the stored record with its id.
    pub async fn create(&self, vendor: Vendor) -> Result<Vendor> {
        let stored = self.store.insert(vendor).await?;
        self.store_embedding(&stored).await;
        Ok(stored)
    }

    /// Embeds a stored vendor into the index. Returns whether it was pinned.
    pub async fn store_embedding(&self, vendor: &Vendor) -> bool {
        match self.try_store_embedding(vendor).await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    vendor = %vendor.name,
                    error = %sanitize_message(&err.message),
                    "Vector storage failed, skipping"
                );
                false
            }
        }
    }

    async fn try_store_embedding(&self, vendor: &Vendor) -> Result<()> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| Error::configuration("Vector index not configured"))?;
        let id = vendor
            .id
            .clone()
            .ok_or_else(|| Error::internal("Vendor has no id"))?;

        let values = self.embedder.embed(&vendor.embedding_text()).await?;
        let record = VectorRecord {
            id,
            values,
            metadata: json!({
                "name": vendor.name,
                "category": vendor.category,
                "priceRange": vendor.price_range,
                "rating": vendor.rating,
            }),
        };

        index.upsert(vec![record]).await
    }

    /// Replaces the store contents with the sample vendors.
    pub async fn seed(&self) -> Result<SeedReport> {
        self.seed_from(sample_vendors()).await
    }

    /// Seeds from raw records. Records without a string name are skipped and
    /// reported; the rest are normalized, stored and embedded one by one.
    pub async fn seed_from(&self, records: Vec<Value>) -> Result<SeedReport> {
        let count = records.len();
        let removed = self.store.clear().await?;
        info!(removed, "Cleared vendor store before seeding");

        let mut details = Vec::with_capacity(count);
        for record in records {
            let name = match record.get("name").and_then(Value::as_str) {
                Some(name) if !name.trim().is_empty() => name.to_string(),
                _ => {
                    warn!("Skipping vendor with invalid name");
                    details.push(SeedDetail {
                        name: "<missing name>".to_string(),
                        pinned: false,
                        error: Some("Invalid name".to_string()),
                    });
                    continue;
                }
            };

            let stored = match serde_json::from_value::<Vendor>(record) {
                Ok(vendor) => self.store.insert(vendor).await,
                Err(err) => Err(Error::from(err)),
            };

            match stored {
                Ok(vendor) => {
                    info!(vendor = %vendor.name, "Seeding embedding");
                    let pinned = self.store_embedding(&vendor).await;
                    details.push(SeedDetail {
                        name,
                        pinned,
                        error: None,
                    });
                }
                Err(err) => {
                    warn!(vendor = %name, error = %err, "Failed to seed vendor");
                    details.push(SeedDetail {
                        name,
                        pinned: false,
                        error: Some(err.message),
                    });
                }
            }
        }

        Ok(SeedReport {
            message: "Seeded vendors and generated embeddings".to_string(),
            count,
            details,
        })
    }

    pub async fn store_stats(&self) -> Result<StoreStats> {
        self.store.stats().await
    }

    /// Index statistics plus a sample of stored vectors when the index is not
    /// empty.
    pub async fn index_debug(&self) -> Result<Value> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| Error::configuration("Vector index not configured"))?;

        let stats = index.describe_stats().await?;
        let samples = if total_vector_count(&stats) > 0 {
            let probe = vec![PROBE_VALUE; PROBE_DIMENSIONS];
            index.query(&probe, PROBE_TOP_K).await?
        } else {
            Vec::new()
        };

        Ok(json!({ "stats": stats, "samples": samples }))
    }
}
