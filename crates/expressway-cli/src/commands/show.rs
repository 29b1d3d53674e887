//! Show command implementation

use crate::cli::ShowArgs;
use crate::output::OutputWriter;
use crate::output_types::VertexRow;
use anyhow::Result;
use expressway_core::ports::FeatureStore;
use expressway_geo::line_length_km;

pub async fn execute(args: ShowArgs, store: &dyn FeatureStore, output: &OutputWriter) -> Result<()> {
    let collection = store.load_collection().await?;
    let feature = super::find_feature(&collection, &args.key)?;

    if output.is_json() {
        return output.result(feature.to_geojson());
    }

    let line = feature.geometry.editable_line();

    output.section(&feature.name);
    let id = feature.id.as_ref().map(|id| id.to_string());
    output.kv("ID", id.as_deref().unwrap_or("(none)"));
    output.kv("Status", &feature.status);
    output.kv("Geometry", feature.geometry.geometry_type());
    output.kv("Vertices", feature.geometry.vertex_count());
    match feature.length_km {
        Some(length) => output.kv("Length", format!("{:.2} km", length)),
        None => output.kv("Length", format!("{:.2} km (computed)", line_length_km(line))),
    }
    for (key, value) in &feature.extra {
        output.kv(key, value);
    }

    output.section("Editable line");
    let rows: Vec<VertexRow> = line
        .iter()
        .enumerate()
        .map(|(index, c)| VertexRow { index, lon: c[0], lat: c[1] })
        .collect();
    output.table(rows)
}
