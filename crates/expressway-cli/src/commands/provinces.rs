//! Provinces command implementation
//!
//! Loads the boundary layer the same way the map does and lists its labels.

use crate::notifier::ConsoleNotifier;
use crate::output::OutputWriter;
use crate::output_types::ProvinceRow;
use anyhow::{Context, Result};
use expressway_core::config::LayeredConfig;
use expressway_core::ports::Layer;
use expressway_editor::{Editor, HeadlessDisplay, HttpFeatureClient, PROVINCE_LABEL_KEY};

pub async fn execute(config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let url = &config.provinces_url.value;
    let client = HttpFeatureClient::new(config.server_url.value.clone());
    let mut editor = Editor::new(HeadlessDisplay::new(), ConsoleNotifier::new(output));

    editor
        .load_provinces(&client, url)
        .await
        .with_context(|| format!("Failed to load provinces from {}", url))?;

    let mut rows: Vec<ProvinceRow> = editor
        .display()
        .layer(&Layer::Provinces)
        .map(|layer| {
            layer
                .features
                .iter()
                .filter_map(|f| f.properties.as_ref()?.get(PROVINCE_LABEL_KEY)?.as_str())
                .map(|label| ProvinceRow {
                    name: label.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();
    rows.sort_by(|a, b| a.name.cmp(&b.name));

    output.info(format!("{} provinces", rows.len()));
    output.table(rows)
}
