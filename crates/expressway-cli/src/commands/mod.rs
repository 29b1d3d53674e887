//! Command implementations

mod add;
mod config;
mod edit;
mod list;
mod provinces;
mod show;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use crate::storage::{open_store, Backend};
use anyhow::{bail, Context, Result};
use expressway_core::config::{CliConfigOverrides, LayeredConfig, CONFIG_FILE_NAME};
use expressway_core::models::Feature;
use expressway_store::collection::{stored_id, stored_name};
use geojson::FeatureCollection;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    let mut config = LayeredConfig::with_defaults()
        .load_from_optional_file(CONFIG_FILE_NAME)?
        .load_from_env();
    config.update_from_cli(CliConfigOverrides {
        data_file: cli.data_file.clone(),
        server_url: cli.server.clone().flatten(),
        provinces_url: match &cli.command {
            Commands::Provinces(args) => args.url.clone(),
            _ => None,
        },
        ..Default::default()
    });

    let backend = Backend::from_flag(&cli.server);

    match cli.command {
        Commands::List => {
            let store = open_store(&backend, &config)?;
            list::execute(store.as_ref(), &output).await
        }
        Commands::Show(args) => {
            let store = open_store(&backend, &config)?;
            show::execute(args, store.as_ref(), &output).await
        }
        Commands::Edit(args) => {
            let store = open_store(&backend, &config)?;
            edit::execute(args, store.as_ref(), &output, cli.dry_run).await
        }
        Commands::Add(args) => {
            let store = open_store(&backend, &config)?;
            add::execute(args, store.as_ref(), &output, cli.dry_run).await
        }
        Commands::Provinces(_) => provinces::execute(&config, &output).await,
        Commands::Config => config::execute(&config, &output),
    }
}

/// Find a stored expressway by id, falling back to its name
fn find_feature(collection: &FeatureCollection, key: &str) -> Result<Feature> {
    let entry = match collection
        .features
        .iter()
        .find(|entry| stored_id(entry).as_deref() == Some(key))
    {
        Some(entry) => entry,
        None => {
            let by_name: Vec<_> = collection
                .features
                .iter()
                .filter(|entry| stored_name(entry) == Some(key))
                .collect();
            match by_name.as_slice() {
                [entry] => *entry,
                [] => bail!("No expressway with id or name '{}'", key),
                many => bail!(
                    "{} expressways are named '{}'; use the id instead",
                    many.len(),
                    key
                ),
            }
        }
    };

    Feature::from_geojson(entry).with_context(|| format!("Stored expressway '{}' is invalid", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> FeatureCollection {
        serde_json::from_value(serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": { "id": "a", "name": "Ring Road" },
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 0.0]] }
                },
                {
                    "type": "Feature",
                    "properties": { "name": "Ring Road" },
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 1.0], [1.0, 1.0]] }
                },
                {
                    "type": "Feature",
                    "properties": { "name": "CT.01" },
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 2.0], [1.0, 2.0]] }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_by_id_then_name() {
        let collection = collection();
        assert_eq!(find_feature(&collection, "a").unwrap().name, "Ring Road");
        assert!(find_feature(&collection, "CT.01").unwrap().id.is_none());
    }

    #[test]
    fn test_find_rejects_duplicate_names_and_unknown_keys() {
        let collection = collection();
        assert!(find_feature(&collection, "Ring Road").is_err());
        assert!(find_feature(&collection, "CT.99").is_err());
    }
}
