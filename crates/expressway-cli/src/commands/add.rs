//! Add command implementation
//!
//! Replays the points as a drawing session and submits the result.

use crate::cli::AddArgs;
use crate::notifier::ConsoleNotifier;
use crate::output::OutputWriter;
use crate::output_types::SaveOutput;
use anyhow::Result;
use expressway_core::models::Status;
use expressway_core::ports::FeatureStore;
use expressway_editor::{Editor, HeadlessDisplay};

pub async fn execute(
    args: AddArgs,
    store: &dyn FeatureStore,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let mut editor = Editor::new(HeadlessDisplay::new(), ConsoleNotifier::new(output));

    editor.start_drawing();
    for point in &args.points {
        editor.add_drawing_point(*point)?;
    }
    let draft = editor.finish_drawing(&args.name, Status::from(args.status.as_str()))?;

    let mut result = SaveOutput {
        id: draft.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        name: draft.name.clone(),
        status: draft.status.to_string(),
        vertices: draft.geometry.vertex_count(),
        length_km: draft.length_km,
        saved: false,
    };

    if dry_run {
        output.info("Dry run: nothing was added");
        return output.result(result);
    }

    let id = editor.add_new(store, draft).await?;
    result.id = id.to_string();
    result.saved = true;
    output.result(result)
}
