//! Hand-off of finished edits to the feature store.

use expressway_core::error::Result;
use expressway_core::models::{Feature, FeatureId};
use expressway_core::ports::FeatureStore;
use geojson::FeatureCollection;

/// Submits features to a store and reloads the collection afterwards
pub struct PersistenceBridge<'a, S: FeatureStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: FeatureStore + ?Sized> PersistenceBridge<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Overwrite an existing feature with its edited version
    ///
    /// `loaded_name` is the name the feature had when it was loaded, used to
    /// find entries stored without an id after a rename.
    pub async fn save(&self, feature: &Feature, loaded_name: &str) -> Result<FeatureId> {
        tracing::info!(
            feature = %feature.name,
            vertices = feature.geometry.vertex_count(),
            "Submitting edited expressway"
        );

        let id = self.store.replace_feature(feature, Some(loaded_name)).await.map_err(|e| {
            tracing::warn!(feature = %feature.name, error = %e, "Save failed");
            e
        })?;

        tracing::info!(id = %id, "Expressway saved");
        Ok(id)
    }

    /// Store a newly drawn feature, generating an id if it has none
    pub async fn add(&self, feature: &Feature) -> Result<FeatureId> {
        let feature = match feature.id {
            Some(_) => feature.clone(),
            None => feature.clone().with_id(FeatureId::generate()),
        };

        tracing::info!(feature = %feature.name, "Submitting new expressway");
        self.store.append_feature(&feature).await
    }

    /// Fetch the collection as persisted
    pub async fn reload(&self) -> Result<FeatureCollection> {
        let collection = self.store.load_collection().await?;
        tracing::debug!(features = collection.features.len(), "Reloaded expressways");
        Ok(collection)
    }
}
