use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Body of both write endpoints: `{ "feature": <GeoJSON Feature> }`
///
/// The feature is kept raw so that a missing or malformed one is reported as
/// invalid feature data rather than a generic body rejection. Updates may add
/// `originalName`, the name an entry without an id was loaded under.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    pub feature: Option<JsonValue>,
    #[serde(default)]
    pub original_name: Option<String>,
}
