use std::collections::HashMap;

use expressway_core::ports::{Layer, MapDisplay};
use geojson::FeatureCollection;

/// Opacity of a layer nobody has touched
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Map display that keeps the latest state of every layer in memory
///
/// Used where there is no real map: the command-line front end and tests.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    layers: HashMap<Layer, FeatureCollection>,
    opacity: HashMap<Layer, f64>,
    renders: usize,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last collection rendered into `layer`, if it has not been cleared
    pub fn layer(&self, layer: &Layer) -> Option<&FeatureCollection> {
        self.layers.get(layer)
    }

    pub fn opacity(&self, layer: &Layer) -> f64 {
        self.opacity.get(layer).copied().unwrap_or(DEFAULT_OPACITY)
    }

    /// Number of render calls so far
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl MapDisplay for HeadlessDisplay {
    fn render(&mut self, layer: Layer, collection: &FeatureCollection) {
        tracing::trace!(?layer, features = collection.features.len(), "render");
        self.renders += 1;
        self.layers.insert(layer, collection.clone());
    }

    fn clear(&mut self, layer: Layer) {
        self.layers.remove(&layer);
    }

    fn set_layer_opacity(&mut self, layer: Layer, opacity: f64) {
        self.opacity.insert(layer, opacity.clamp(0.0, 1.0));
    }
}
