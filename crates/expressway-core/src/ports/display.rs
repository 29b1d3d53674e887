use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Map layers the editor draws into
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Province boundary polygons
    Provinces,
    /// All expressways as loaded from the store
    Expressways,
    /// The static rendering of a single expressway, keyed by id or name
    Feature(String),
    /// Line and vertex handles of the feature under edit
    EditOverlay,
    /// Freehand line of a feature being drawn
    Drawing,
}

/// Port for the map rendering collaborator
pub trait MapDisplay {
    /// Replace the contents of a layer
    fn render(&mut self, layer: Layer, collection: &FeatureCollection);

    /// Remove everything from a layer
    fn clear(&mut self, layer: Layer);

    /// Set a layer's opacity, 0.0 hides it
    fn set_layer_opacity(&mut self, layer: Layer, opacity: f64);
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Success => f.write_str("success"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Port for the user-facing status channel
///
/// The channel has a single slot: each message replaces the previous one.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: String);
}
