use async_trait::async_trait;
use geojson::FeatureCollection;

use crate::error::Result;
use crate::models::{Feature, FeatureId};

/// Port for the server-side expressway collection
///
/// Both write operations persist the full updated collection before
/// returning.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Load the whole collection as currently persisted
    async fn load_collection(&self) -> Result<FeatureCollection>;

    /// Add a new feature, returning the id it was stored under
    async fn append_feature(&self, feature: &Feature) -> Result<FeatureId>;

    /// Overwrite an existing feature
    ///
    /// Matches by `id`. Entries stored without an id are matched by
    /// `match_name`, the name the feature was loaded under, or by the
    /// feature's own name when that is `None`.
    async fn replace_feature(
        &self,
        feature: &Feature,
        match_name: Option<&str>,
    ) -> Result<FeatureId>;
}
