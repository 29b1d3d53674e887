//! Line geometry types for expressway features.
//!
//! These map directly onto the GeoJSON `LineString` and `MultiLineString`
//! geometry objects. Only the first line of a `MultiLineString` is ever edited;
//! the remaining lines are carried through untouched.

use serde::{Deserialize, Serialize};

use crate::error::{ExpresswayError, Result};

/// A `[longitude, latitude]` pair
pub type Coordinate = [f64; 2];

/// A line needs at least two endpoints
pub const MIN_LINE_VERTICES: usize = 2;

/// GeoJSON-compatible line geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LineGeometry {
    LineString {
        coordinates: Vec<Coordinate>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Coordinate>>,
    },
}

impl LineGeometry {
    /// Create a LineString geometry
    pub fn line_string(coords: Vec<Coordinate>) -> Self {
        LineGeometry::LineString { coordinates: coords }
    }

    /// GeoJSON type name
    pub fn geometry_type(&self) -> &'static str {
        match self {
            LineGeometry::LineString { .. } => "LineString",
            LineGeometry::MultiLineString { .. } => "MultiLineString",
        }
    }

    /// The line an edit session works on
    pub fn editable_line(&self) -> &[Coordinate] {
        match self {
            LineGeometry::LineString { coordinates } => coordinates,
            LineGeometry::MultiLineString { coordinates } => {
                coordinates.first().map(Vec::as_slice).unwrap_or(&[])
            }
        }
    }

    /// Return a copy with the editable line replaced
    pub fn with_editable_line(&self, line: Vec<Coordinate>) -> Self {
        match self {
            LineGeometry::LineString { .. } => LineGeometry::LineString { coordinates: line },
            LineGeometry::MultiLineString { coordinates } => {
                let mut lines = coordinates.clone();
                match lines.first_mut() {
                    Some(first) => *first = line,
                    None => lines.push(line),
                }
                LineGeometry::MultiLineString { coordinates: lines }
            }
        }
    }

    /// Total number of vertices across all lines
    pub fn vertex_count(&self) -> usize {
        match self {
            LineGeometry::LineString { coordinates } => coordinates.len(),
            LineGeometry::MultiLineString { coordinates } => coordinates.iter().map(Vec::len).sum(),
        }
    }

    /// Parse from a GeoJSON geometry value
    pub fn from_geojson(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| {
            let found = value.get("type").and_then(|t| t.as_str()).unwrap_or("unknown");
            ExpresswayError::malformed(format!(
                "expected a LineString or MultiLineString geometry, found {}: {}",
                found, e
            ))
        })
    }

    /// Convert to a GeoJSON geometry value
    pub fn to_geojson(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
