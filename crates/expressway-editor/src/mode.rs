use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{
    Coordinate, Feature, FeatureId, LineGeometry, Status, MIN_LINE_VERTICES,
};
use expressway_geo::line_length_km;
use geojson::FeatureCollection;

use crate::session::EditSession;

/// What the pointer currently does on the map
///
/// Drawing and editing are exclusive by construction: switching to one drops
/// the other.
#[derive(Debug, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Drawing(DrawingDraft),
    Editing(EditSession),
}

impl InteractionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionMode::Idle)
    }
}

/// Points of a new expressway being drawn freehand
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingDraft {
    points: Vec<Coordinate>,
}

impl DrawingDraft {
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn push(&mut self, point: Coordinate) {
        self.points.push(point);
    }

    /// The draft line as drawn so far
    pub fn preview(&self) -> FeatureCollection {
        let features = if self.points.len() < MIN_LINE_VERTICES {
            Vec::new()
        } else {
            let line = LineGeometry::line_string(self.points.clone());
            vec![geojson::Feature {
                bbox: None,
                geometry: geojson::Geometry::from_json_value(line.to_geojson()).ok(),
                id: None,
                properties: None,
                foreign_members: None,
            }]
        };

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }

    /// Turn the draft into a new feature with a fresh id
    pub fn to_feature(&self, name: &str, status: Status) -> Result<Feature> {
        if self.points.len() < MIN_LINE_VERTICES {
            return Err(ExpresswayError::ConstraintViolation {
                minimum: MIN_LINE_VERTICES,
                current: self.points.len(),
            });
        }
        if name.trim().is_empty() {
            return Err(ExpresswayError::malformed("feature name cannot be empty"));
        }

        let mut feature = Feature::new(
            name,
            status,
            LineGeometry::line_string(self.points.clone()),
        )
        .with_id(FeatureId::generate());
        feature.length_km = Some(line_length_km(&self.points));
        Ok(feature)
    }
}
