//! Tests for vendor search and the vendor catalog
