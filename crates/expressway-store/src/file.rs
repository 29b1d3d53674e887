//! Flat-file adapter: the whole collection lives in one GeoJSON document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{Feature, FeatureId};
use expressway_core::ports::FeatureStore;
use geojson::{FeatureCollection, GeoJson};
use tokio::sync::Mutex;

use crate::collection::{append_to, empty_collection, replace_in};

/// `FeatureStore` over a GeoJSON FeatureCollection file
///
/// Every write rewrites the full document, pretty-printed, through a
/// temporary file and a rename. Read-modify-write cycles are serialized
/// within this process only; another process writing the same file still
/// races last-write-wins.
#[derive(Debug)]
pub struct FileFeatureStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileFeatureStore {
    /// Use an existing data file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Use `path`, creating an empty collection there if nothing exists yet
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);

        if tokio::fs::try_exists(&store.path).await? {
            // Fail early on a file that is not a collection
            store.read().await?;
        } else {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            store.write(&empty_collection()).await?;
            tracing::info!(path = %store.path.display(), "Created empty expressway collection");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<FeatureCollection> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let geojson = content
            .parse::<GeoJson>()
            .map_err(|e| ExpresswayError::Serialization(format!("{}: {}", self.path.display(), e)))?;

        match geojson {
            GeoJson::FeatureCollection(collection) => Ok(collection),
            _ => Err(ExpresswayError::NotACollection {
                path: self.path.clone(),
            }),
        }
    }

    async fn write(&self, collection: &FeatureCollection) -> Result<()> {
        let content = serde_json::to_string_pretty(collection)?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection.geojson".to_string());
        let tmp_path = self.path.with_file_name(format!(".{}.tmp", file_name));

        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            features = collection.features.len(),
            "Wrote expressway collection"
        );
        Ok(())
    }

    /// Read the collection, apply `op` and write it back if `op` succeeds
    async fn modify<F>(&self, op: F) -> Result<FeatureId>
    where
        F: FnOnce(&mut FeatureCollection) -> Result<FeatureId> + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.read().await?;
        let id = op(&mut collection)?;
        self.write(&collection).await?;
        Ok(id)
    }
}

#[async_trait]
impl FeatureStore for FileFeatureStore {
    async fn load_collection(&self) -> Result<FeatureCollection> {
        self.read().await
    }

    async fn append_feature(&self, feature: &Feature) -> Result<FeatureId> {
        self.modify(|collection| append_to(collection, feature)).await
    }

    async fn replace_feature(
        &self,
        feature: &Feature,
        match_name: Option<&str>,
    ) -> Result<FeatureId> {
        self.modify(|collection| replace_in(collection, feature, match_name))
            .await
    }
}
