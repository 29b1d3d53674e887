//! The bounded context owning one feature's in-progress edits.

use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{Coordinate, Feature, FeatureId, LineGeometry};
use expressway_geo::{line_length_km, nearest_insertion_index, validate_coordinate, validate_line};
use geojson::{FeatureCollection, Geometry};
use serde_json::{Map, Value as JsonValue};

use crate::geometry_store::GeometryStore;
use crate::markers::{MarkerId, MarkerSet, VertexMarker};

/// Edits of a single feature
///
/// Every method that mutates the vertex list goes through the marker set, so
/// the store and the markers never disagree in length or order.
#[derive(Debug, Clone)]
pub struct EditSession {
    feature: Feature,
    layer_key: String,
    store: GeometryStore,
    markers: MarkerSet,
    name_input: String,
}

impl EditSession {
    /// Seed a session from a feature's editable line
    pub fn open(feature: Feature) -> Result<Self> {
        let line = feature.geometry.editable_line().to_vec();
        validate_line(&line)?;

        let markers = MarkerSet::build(&line);
        Ok(Self {
            layer_key: feature.layer_key(),
            name_input: feature.name.clone(),
            store: GeometryStore::new(line),
            markers,
            feature,
        })
    }

    /// The feature as it was when the session opened
    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    /// Key of the feature's static display layer
    pub fn layer_key(&self) -> &str {
        &self.layer_key
    }

    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Current contents of the name-editing control
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn drag(&mut self, id: MarkerId, position: Coordinate) -> Result<()> {
        let index = self
            .markers
            .get(id)
            .map(|m| m.index)
            .ok_or(ExpresswayError::UnknownMarker { marker: id.0 })?;
        validate_coordinate(index, position)?;
        self.markers.on_drag(&mut self.store, id, position)
    }

    pub fn remove(&mut self, id: MarkerId) -> Result<VertexMarker> {
        self.markers.on_remove_requested(&mut self.store, id)
    }

    /// Insert a vertex on the segment closest to `position`
    pub fn insert_near(&mut self, position: Coordinate) -> Result<MarkerId> {
        let index = nearest_insertion_index(position, self.store.coordinates());
        self.insert_at(index, position)
    }

    pub fn insert_at(&mut self, index: usize, position: Coordinate) -> Result<MarkerId> {
        validate_coordinate(index, position)?;
        Ok(self.markers.insert_at(&mut self.store, index, position))
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ExpresswayError::malformed("feature name cannot be empty"));
        }
        self.name_input = name;
        Ok(())
    }

    /// Give the feature an id if it never had one
    ///
    /// The id sticks to the session so that retries after a failed save
    /// submit the same identity.
    pub fn assign_id_if_absent(&mut self) -> FeatureId {
        self.feature.id.get_or_insert_with(FeatureId::generate).clone()
    }

    /// The feature with all in-progress edits applied
    pub fn to_feature(&self) -> Feature {
        let line = self.store.coordinates().to_vec();
        let mut feature = self.feature.clone();
        feature.name = self.name_input.clone();
        feature.length_km = Some(line_length_km(&line));
        feature.geometry = feature.geometry.with_editable_line(line);
        feature
    }

    /// Editable overlay: the line followed by one point per marker
    pub fn overlay(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(self.markers.len() + 1);

        let line = LineGeometry::line_string(self.store.coordinates().to_vec());
        let mut properties = Map::new();
        properties.insert("role".to_string(), JsonValue::from("line"));
        properties.insert("name".to_string(), JsonValue::from(self.name_input.clone()));
        features.push(overlay_feature(line.to_geojson(), properties));

        for marker in self.markers.iter() {
            let point = serde_json::json!({
                "type": "Point",
                "coordinates": [marker.position[0], marker.position[1]],
            });
            let mut properties = Map::new();
            properties.insert("role".to_string(), JsonValue::from("vertex"));
            properties.insert("coord_index".to_string(), JsonValue::from(marker.index));
            properties.insert("marker_id".to_string(), JsonValue::from(marker.id.0));
            features.push(overlay_feature(point, properties));
        }

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

fn overlay_feature(geometry: JsonValue, properties: Map<String, JsonValue>) -> geojson::Feature {
    geojson::Feature {
        bbox: None,
        geometry: Geometry::from_json_value(geometry).ok(),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expressway_core::models::Status;

    fn feature(coords: Vec<Coordinate>) -> Feature {
        Feature::new("CT.01", Status::Operational, LineGeometry::line_string(coords))
    }

    #[test]
    fn test_open_rejects_short_line() {
        let err = EditSession::open(feature(vec![[106.0, 10.0]])).unwrap_err();
        assert!(matches!(err, ExpresswayError::MalformedInput { .. }));
    }

    #[test]
    fn test_open_seeds_store_and_markers() {
        let session = EditSession::open(feature(vec![[106.0, 10.0], [106.1, 10.1]])).unwrap();
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.markers().len(), 2);
        assert_eq!(session.name_input(), "CT.01");
        assert_eq!(session.layer_key(), "CT.01");
    }

    #[test]
    fn test_insert_near_splits_closest_segment() {
        let mut session = EditSession::open(feature(vec![[0.0, 0.0], [10.0, 0.0]])).unwrap();
        let old_second = session.markers().at(1).unwrap().id;

        let id = session.insert_near([5.0, 1.0]).unwrap();

        assert_eq!(session.store().coordinates(), &[[0.0, 0.0], [5.0, 1.0], [10.0, 0.0]]);
        assert_eq!(session.markers().get(id).unwrap().index, 1);
        assert_eq!(session.markers().get(old_second).unwrap().index, 2);
    }

    #[test]
    fn test_drag_rejects_out_of_range_position() {
        let mut session = EditSession::open(feature(vec![[0.0, 0.0], [10.0, 0.0]])).unwrap();
        let id = session.markers().at(0).unwrap().id;

        assert!(session.drag(id, [200.0, 0.0]).is_err());
        assert_eq!(session.store().get(0), Some([0.0, 0.0]));
    }

    #[test]
    fn test_rename_rejects_blank() {
        let mut session = EditSession::open(feature(vec![[0.0, 0.0], [1.0, 0.0]])).unwrap();
        assert!(session.rename("   ").is_err());
        assert_eq!(session.name_input(), "CT.01");

        session.rename("CT.02").unwrap();
        assert_eq!(session.to_feature().name, "CT.02");
    }

    #[test]
    fn test_to_feature_keeps_other_lines() {
        let multi = Feature::new(
            "Ring Road 3",
            Status::Construction,
            LineGeometry::MultiLineString {
                coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0]], vec![[5.0, 5.0], [6.0, 5.0]]],
            },
        );
        let mut session = EditSession::open(multi).unwrap();
        session.insert_at(1, [0.5, 0.1]).unwrap();

        let saved = session.to_feature();
        match saved.geometry {
            LineGeometry::MultiLineString { coordinates } => {
                assert_eq!(coordinates[0].len(), 3);
                assert_eq!(coordinates[1], vec![[5.0, 5.0], [6.0, 5.0]]);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
        assert!(saved.length_km.is_some());
    }

    #[test]
    fn test_assigned_id_is_stable() {
        let mut session = EditSession::open(feature(vec![[0.0, 0.0], [1.0, 0.0]])).unwrap();
        let first = session.assign_id_if_absent();
        let second = session.assign_id_if_absent();
        assert_eq!(first, second);
        assert_eq!(session.to_feature().id, Some(first));
        // The display layer key does not follow the new id
        assert_eq!(session.layer_key(), "CT.01");
    }

    #[test]
    fn test_overlay_has_line_and_vertices() {
        let session =
            EditSession::open(feature(vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]])).unwrap();
        let overlay = session.overlay();

        assert_eq!(overlay.features.len(), 4);
        let line = &overlay.features[0];
        assert_eq!(line.properties.as_ref().unwrap()["role"], "line");
        assert!(line.geometry.is_some());

        let vertex = overlay.features[3].properties.as_ref().unwrap();
        assert_eq!(vertex["role"], "vertex");
        assert_eq!(vertex["coord_index"], 2);
    }
}
