//! In-memory storage implementation for development and testing.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. For anything that must survive a restart, use the
//! file backend.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use expressway_core::error::Result;
use expressway_core::models::{Feature, FeatureId};
use expressway_core::ports::FeatureStore;
use geojson::FeatureCollection;

use crate::collection::{append_to, empty_collection, replace_in};

/// In-memory implementation of FeatureStore
#[derive(Debug, Clone)]
pub struct MemoryFeatureStore {
    collection: Arc<RwLock<FeatureCollection>>,
    writes: Arc<RwLock<u64>>,
}

impl Default for MemoryFeatureStore {
    fn default() -> Self {
        Self {
            collection: Arc::new(RwLock::new(empty_collection())),
            writes: Arc::new(RwLock::new(0)),
        }
    }
}

impl MemoryFeatureStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `features`
    pub fn with_features(features: impl IntoIterator<Item = Feature>) -> Self {
        let store = Self::new();
        store
            .collection
            .write()
            .unwrap()
            .features
            .extend(features.into_iter().map(|f| f.to_geojson()));
        store
    }

    /// Copy of the stored collection
    pub fn snapshot(&self) -> FeatureCollection {
        self.collection.read().unwrap().clone()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> u64 {
        *self.writes.read().unwrap()
    }

    fn modify(
        &self,
        op: impl FnOnce(&mut FeatureCollection) -> Result<FeatureId>,
    ) -> Result<FeatureId> {
        let mut collection = self.collection.write().unwrap();
        let id = op(&mut *collection)?;
        *self.writes.write().unwrap() += 1;
        Ok(id)
    }
}

#[async_trait]
impl FeatureStore for MemoryFeatureStore {
    async fn load_collection(&self) -> Result<FeatureCollection> {
        Ok(self.snapshot())
    }

    async fn append_feature(&self, feature: &Feature) -> Result<FeatureId> {
        self.modify(|collection| append_to(collection, feature))
    }

    async fn replace_feature(
        &self,
        feature: &Feature,
        match_name: Option<&str>,
    ) -> Result<FeatureId> {
        self.modify(|collection| replace_in(collection, feature, match_name))
    }
}
