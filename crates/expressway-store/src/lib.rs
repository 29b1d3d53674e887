//! Expressway Store - `FeatureStore` adapters
//!
//! This crate provides the flat-file adapter used by the server and an
//! in-memory adapter for development and testing. Both share the matching
//! rules in [`collection`].

pub mod collection;
pub mod file;
pub mod memory;

pub use file::FileFeatureStore;
pub use memory::MemoryFeatureStore;
