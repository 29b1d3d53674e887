//! Expressway feature model and its GeoJSON wire representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use uuid::Uuid;

use crate::error::{ExpresswayError, Result};
use crate::models::geometry::LineGeometry;

/// Properties owned by the model; everything else is preserved verbatim
const RESERVED_PROPERTIES: [&str; 4] = ["id", "name", "status", "length_km"];

/// Stable feature identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh unique id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Construction status of an expressway
///
/// Unknown values are kept as-is so that saving a feature never rewrites a
/// status the editor does not understand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    #[default]
    Operational,
    Planning,
    Construction,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Operational => "operational",
            Status::Planning => "planning",
            Status::Construction => "construction",
            Status::Other(s) => s,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "operational" => Status::Operational,
            "planning" => Status::Planning,
            "construction" => Status::Construction,
            _ => Status::Other(s),
        }
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Status::from(s.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One expressway with its metadata and line geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<FeatureId>,
    pub name: String,
    pub status: Status,
    pub length_km: Option<f64>,
    pub geometry: LineGeometry,
    /// Properties not interpreted by the editor
    pub extra: Map<String, JsonValue>,
}

impl Feature {
    pub fn new(name: impl Into<String>, status: Status, geometry: LineGeometry) -> Self {
        Self {
            id: None,
            name: name.into(),
            status,
            length_km: None,
            geometry,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = Some(id);
        self
    }

    /// Key used to address the feature's display layer: its id, or its name
    /// for legacy entries that never had one
    pub fn layer_key(&self) -> String {
        match &self.id {
            Some(id) => id.0.clone(),
            None => self.name.clone(),
        }
    }

    /// Parse a GeoJSON feature
    ///
    /// Requires properties with a non-empty `name` and a line geometry. A
    /// missing `status` falls back to the default.
    pub fn from_geojson(feature: &geojson::Feature) -> Result<Self> {
        let properties = feature
            .properties
            .as_ref()
            .ok_or_else(|| ExpresswayError::malformed("feature has no properties"))?;

        let name = properties
            .get("name")
            .and_then(JsonValue::as_str)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ExpresswayError::malformed("feature is missing a name"))?
            .to_string();

        let id = properties
            .get("id")
            .and_then(json_id)
            .or_else(|| {
                feature.id.as_ref().map(|id| match id {
                    geojson::feature::Id::String(s) => s.clone(),
                    geojson::feature::Id::Number(n) => n.to_string(),
                })
            })
            .map(FeatureId);

        let status = properties
            .get("status")
            .and_then(JsonValue::as_str)
            .map(Status::from)
            .unwrap_or_default();

        let length_km = properties.get("length_km").and_then(JsonValue::as_f64);

        let geometry_json = feature
            .geometry
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?
            .ok_or_else(|| ExpresswayError::malformed(format!("feature '{}' has no geometry", name)))?;
        let geometry = LineGeometry::from_geojson(&geometry_json)?;

        let extra = properties
            .iter()
            .filter(|(key, _)| !RESERVED_PROPERTIES.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            id,
            name,
            status,
            length_km,
            geometry,
            extra,
        })
    }

    /// Parse a GeoJSON feature from a raw JSON value
    pub fn from_json_value(value: JsonValue) -> Result<Self> {
        let feature: geojson::Feature = serde_json::from_value(value)
            .map_err(|e| ExpresswayError::malformed(format!("not a GeoJSON feature: {}", e)))?;
        Self::from_geojson(&feature)
    }

    /// Convert to the GeoJSON wire representation
    pub fn to_geojson(&self) -> geojson::Feature {
        let mut properties = self.extra.clone();
        if let Some(id) = &self.id {
            properties.insert("id".to_string(), JsonValue::from(id.0.clone()));
        }
        properties.insert("name".to_string(), JsonValue::from(self.name.clone()));
        properties.insert("status".to_string(), JsonValue::from(self.status.as_str()));
        if let Some(length_km) = self.length_km {
            properties.insert("length_km".to_string(), JsonValue::from(length_km));
        }

        geojson::Feature {
            bbox: None,
            geometry: geojson::Geometry::from_json_value(self.geometry.to_geojson()).ok(),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

fn json_id(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
