//! Edit command implementation
//!
//! Runs one edit session headlessly. Vertex indices given on the command line
//! refer to the line as stored; they are resolved to markers before any change
//! so that inserts and removes do not shift what later arguments point at.

use crate::cli::EditArgs;
use crate::notifier::ConsoleNotifier;
use crate::output::OutputWriter;
use crate::output_types::SaveOutput;
use anyhow::{anyhow, bail, Result};
use expressway_core::models::Feature;
use expressway_core::ports::{FeatureStore, MapDisplay, Notifier};
use expressway_editor::{Editor, HeadlessDisplay, MarkerId};

pub async fn execute(
    args: EditArgs,
    store: &dyn FeatureStore,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    if !args.has_changes() {
        bail!("Nothing to do. Pass --move, --insert, --remove or --rename");
    }

    let collection = store.load_collection().await?;
    let feature = super::find_feature(&collection, &args.key)?;

    let mut editor = Editor::new(HeadlessDisplay::new(), ConsoleNotifier::new(output));
    editor.select(feature)?;

    let moves = args
        .moves
        .iter()
        .map(|m| marker_at(&editor, m.index).map(|marker| (marker, m.position)))
        .collect::<Result<Vec<_>>>()?;
    let removes = args
        .removes
        .iter()
        .map(|&index| marker_at(&editor, index))
        .collect::<Result<Vec<_>>>()?;

    for (marker, position) in moves {
        editor.drag_marker(marker, position)?;
    }
    for position in &args.inserts {
        editor.insert_point(*position)?;
    }
    for marker in removes {
        editor.remove_marker(marker)?;
    }
    if let Some(name) = &args.rename {
        editor.rename(name)?;
    }

    let edited = editor
        .session()
        .map(|session| session.to_feature())
        .ok_or_else(|| anyhow!("Edit session closed unexpectedly"))?;

    if dry_run {
        output.info("Dry run: no changes were saved");
        return output.result(save_output(&edited, None));
    }

    let id = editor.save(store).await?;
    output.result(save_output(&edited, Some(id.to_string())))
}

/// Marker bound to vertex `index` of the line as it was selected
fn marker_at<D: MapDisplay, N: Notifier>(editor: &Editor<D, N>, index: usize) -> Result<MarkerId> {
    let markers = editor
        .session()
        .map(|session| session.markers())
        .ok_or_else(|| anyhow!("No expressway is being edited"))?;

    markers.at(index).map(|marker| marker.id).ok_or_else(|| {
        anyhow!("Vertex {} does not exist; the line has {} vertices", index, markers.len())
    })
}

fn save_output(feature: &Feature, saved_id: Option<String>) -> SaveOutput {
    let saved = saved_id.is_some();
    SaveOutput {
        id: saved_id
            .or_else(|| feature.id.as_ref().map(|id| id.to_string()))
            .unwrap_or_default(),
        name: feature.name.clone(),
        status: feature.status.to_string(),
        vertices: feature.geometry.vertex_count(),
        length_km: feature.length_km,
        saved,
    }
}
