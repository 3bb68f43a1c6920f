// vendor-search-rs/src/store.rs
// Vendor document store
// The store is a collaborator behind `VendorStore`; `MemoryVendorStore` keeps
// records in insertion order for a single process.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use error_handling::Result;
use llm_service::Vendor;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const VENDOR_COLLECTION: &str = "vendors";

/// Shape reported by the db-debug route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    pub database: String,
    pub collections: Vec<String>,
    pub counts: BTreeMap<String, usize>,
}

#[async_trait]
pub trait VendorStore: Send + Sync {
    /// All vendors, in storage order
    async fn list(&self) -> Result<Vec<Vendor>>;

    /// Stores the vendor under a fresh id and returns the stored record
    async fn insert(&self, vendor: Vendor) -> Result<Vendor>;

    /// Vendors whose id is in `ids`; unknown ids are skipped
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Vendor>>;

    /// Vendors matching the phrase or any token, at most `limit`
    async fn keyword_search(&self, phrase: &str, tokens: &[String], limit: usize) -> Result<Vec<Vendor>>;

    /// Removes every vendor, returning how many were removed
    async fn clear(&self) -> Result<usize>;

    async fn stats(&self) -> Result<StoreStats>;
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Case-insensitive literal match used by keyword search.
///
/// The whole phrase is checked against name and description; each token
/// is checked against name, category, description, style and specialties.
pub fn matches_keywords(vendor: &Vendor, phrase: &str, tokens: &[String]) -> bool {
    let phrase = phrase.trim().to_lowercase();
    if !phrase.is_empty()
        && (contains_ci(&vendor.name, &phrase) || contains_ci(&vendor.description, &phrase))
    {
        return true;
    }

    tokens.iter().map(|t| t.to_lowercase()).any(|token| {
        contains_ci(&vendor.name, &token)
            || contains_ci(&vendor.category, &token)
            || contains_ci(&vendor.description, &token)
            || contains_ci(&vendor.style, &token)
            || vendor.specialties.iter().any(|s| contains_ci(s, &token))
    })
}

#[derive(Debug)]
pub struct MemoryVendorStore {
    database: String,
    vendors: RwLock<Vec<Vendor>>,
}

impl MemoryVendorStore {
    pub fn new<S: Into<String>>(database: S) -> Self {
        Self {
            database: database.into(),
            vendors: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryVendorStore {
    fn default() -> Self {
        Self::new("event_planner")
    }
}

#[async_trait]
impl VendorStore for MemoryVendorStore {
    async fn list(&self) -> Result<Vec<Vendor>> {
        Ok(self.vendors.read().await.clone())
    }

    async fn insert(&self, vendor: Vendor) -> Result<Vendor> {
        let stored = Vendor {
            id: Some(Uuid::new_v4().simple().to_string()),
            similarity_score: None,
            ..vendor
        };
        self.vendors.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Vendor>> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        Ok(self
            .vendors
            .read()
            .await
            .iter()
            .filter(|v| v.id.as_deref().is_some_and(|id| wanted.contains(id)))
            .cloned()
            .collect())
    }

    async fn keyword_search(&self, phrase: &str, tokens: &[String], limit: usize) -> Result<Vec<Vendor>> {
        Ok(self
            .vendors
            .read()
            .await
            .iter()
            .filter(|v| matches_keywords(v, phrase, tokens))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn clear(&self) -> Result<usize> {
        let mut vendors = self.vendors.write().await;
        let removed = vendors.len();
        vendors.clear();
        Ok(removed)
    }

    async fn stats(&self) -> Result<StoreStats> {
        let count = self.vendors.read().await.len();
        let mut counts = BTreeMap::new();
        counts.insert(VENDOR_COLLECTION.to_string(), count);

        Ok(StoreStats {
            database: self.database.clone(),
            collections: vec![VENDOR_COLLECTION.to_string()],
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(name: &str, category: &str, style: &str, specialties: &[&str]) -> Vendor {
        Vendor {
            name: name.to_string(),
            category: category.to_string(),
            style: style.to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_keyword_fields() {
        let v = vendor("Neon Dreams Decor", "Decoration", "Futuristic, Bold", &["LED", "Cyberpunk"]);
        assert!(matches_keywords(&v, "", &["neon".into()]));
        assert!(matches_keywords(&v, "", &["decoration".into()]));
        assert!(matches_keywords(&v, "", &["futuristic".into()]));
        assert!(matches_keywords(&v, "", &["cyber".into()]));
        assert!(!matches_keywords(&v, "", &["catering".into()]));
        assert!(!matches_keywords(&v, "", &[]));
    }

    #[test]
    fn test_tokens_are_literal() {
        let v = vendor("Spice Route (Catering)", "Catering", "", &[]);
        assert!(matches_keywords(&v, "", &["(catering)".into()]));
        assert!(!matches_keywords(&v, "", &["c.t".into()]));
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_finds_them() {
        let store = MemoryVendorStore::default();
        let a = store.insert(vendor("A", "DJ/Music", "", &[])).await.unwrap();
        let b = store.insert(vendor("B", "Catering", "", &[])).await.unwrap();
        assert_ne!(a.id, b.id);

        let found = store
            .find_by_ids(&[b.id.clone().unwrap(), "missing".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "B");
    }

    #[tokio::test]
    async fn test_keyword_search_limit_and_clear() {
        let store = MemoryVendorStore::default();
        for i in 0..15 {
            store.insert(vendor(&format!("DJ {}", i), "DJ/Music", "", &[])).await.unwrap();
        }

        let hits = store.keyword_search("dj", &["dj".into()], 10).await.unwrap();
        assert_eq!(hits.len(), 10);

        assert_eq!(store.clear().await.unwrap(), 15);
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.counts[VENDOR_COLLECTION], 0);
    }
}
