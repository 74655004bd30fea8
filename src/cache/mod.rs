//! Manifest cache - pluggable key-value store with TTL-based freshness

pub mod store;
