// vendor-search-rs/src/lib.rs
// Vendor catalog and layered vendor search for the event planner.

pub mod catalog;
pub mod search;
pub mod seed;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod vector_index;

#[cfg(test)]
mod tests;

pub use catalog::{SeedDetail, SeedReport, VendorCatalog};
pub use search::{tokenize, SearchOutcome, SearchStrategy, VendorSearch};
pub use store::{matches_keywords, MemoryVendorStore, StoreStats, VendorStore};
pub use vector_index::{PineconeIndex, VectorIndex, VectorMatch, VectorRecord};
