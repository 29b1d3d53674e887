//! List command implementation

use crate::output::OutputWriter;
use crate::output_types::ExpresswayRow;
use anyhow::Result;
use expressway_core::models::Feature;
use expressway_core::ports::FeatureStore;
use expressway_geo::line_length_km;

pub async fn execute(store: &dyn FeatureStore, output: &OutputWriter) -> Result<()> {
    let collection = store.load_collection().await?;

    let mut rows = Vec::with_capacity(collection.features.len());
    for (position, entry) in collection.features.iter().enumerate() {
        match Feature::from_geojson(entry) {
            Ok(feature) => rows.push(row(&feature)),
            Err(e) => output.warning(format!("Skipping entry {}: {}", position, e)),
        }
    }

    output.table(rows)
}

fn row(feature: &Feature) -> ExpresswayRow {
    let length_km = feature
        .length_km
        .unwrap_or_else(|| line_length_km(feature.geometry.editable_line()));

    ExpresswayRow {
        id: feature.id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        name: feature.name.clone(),
        status: feature.status.to_string(),
        geometry: feature.geometry.geometry_type().to_string(),
        vertices: feature.geometry.vertex_count(),
        length_km: format!("{:.2}", length_km),
    }
}
