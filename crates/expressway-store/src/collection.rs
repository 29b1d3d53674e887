//! Matching and mutation rules shared by every adapter.
//!
//! Stored entries are kept as raw GeoJSON. A replace merges the incoming
//! feature into the stored entry, so properties and foreign members the editor
//! does not understand survive a rewrite untouched.

use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{Feature, FeatureId};
use geojson::FeatureCollection;
use serde_json::Value as JsonValue;

/// Id of a stored entry, from `properties.id` or the top-level `id`
pub fn stored_id(entry: &geojson::Feature) -> Option<String> {
    let from_properties = entry
        .properties
        .as_ref()
        .and_then(|p| p.get("id"))
        .and_then(|id| match id {
            JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        });

    from_properties.or_else(|| {
        entry.id.as_ref().map(|id| match id {
            geojson::feature::Id::String(s) => s.clone(),
            geojson::feature::Id::Number(n) => n.to_string(),
        })
    })
}

pub fn stored_name(entry: &geojson::Feature) -> Option<&str> {
    entry
        .properties
        .as_ref()
        .and_then(|p| p.get("name"))
        .and_then(JsonValue::as_str)
}

/// Position of the entry `feature` should overwrite
///
/// An entry with the same id wins. Otherwise `match_name` (the name the entry
/// was loaded under, defaulting to the feature's current name) is looked up
/// among entries that have no id at all; exactly one must match.
pub fn find_replace_target(
    entries: &[geojson::Feature],
    feature: &Feature,
    match_name: Option<&str>,
) -> Result<usize> {
    if let Some(id) = &feature.id {
        if let Some(index) = entries
            .iter()
            .position(|entry| stored_id(entry).as_deref() == Some(id.as_str()))
        {
            return Ok(index);
        }
    }

    let name = match_name.unwrap_or(feature.name.as_str());
    let candidates: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| stored_id(entry).is_none())
        .filter(|(_, entry)| stored_name(entry) == Some(name))
        .map(|(index, _)| index)
        .collect();

    match candidates.as_slice() {
        [index] => Ok(*index),
        [] => Err(ExpresswayError::NotFound {
            key: feature.layer_key(),
        }),
        many => Err(ExpresswayError::AmbiguousMatch {
            name: name.to_string(),
            count: many.len(),
        }),
    }
}

/// Overwrite the matching entry in place, returning the id it now carries
///
/// A feature without an id is given one. Nothing changes on error.
pub fn replace_in(
    collection: &mut FeatureCollection,
    feature: &Feature,
    match_name: Option<&str>,
) -> Result<FeatureId> {
    let index = find_replace_target(&collection.features, feature, match_name)?;

    let mut feature = feature.clone();
    let id = feature.id.get_or_insert_with(FeatureId::generate).clone();

    tracing::debug!(index, id = %id, name = %feature.name, "Replacing stored feature");
    merge_into(&mut collection.features[index], feature.to_geojson());
    Ok(id)
}

/// Apply `incoming` over `entry`
///
/// Geometry is replaced and incoming properties win. Stored properties the
/// incoming feature lacks are kept, as are foreign members. An id stored at
/// the top level stays there.
fn merge_into(entry: &mut geojson::Feature, incoming: geojson::Feature) {
    let mut properties = entry.properties.take().unwrap_or_default();
    for (key, value) in incoming.properties.unwrap_or_default() {
        if key == "id" && entry.id.is_some() {
            continue;
        }
        properties.insert(key, value);
    }

    entry.properties = Some(properties);
    entry.geometry = incoming.geometry;
    entry.bbox = None;
}

/// Append a feature, rejecting an id that is already taken
pub fn append_to(collection: &mut FeatureCollection, feature: &Feature) -> Result<FeatureId> {
    let mut feature = feature.clone();
    let id = feature.id.get_or_insert_with(FeatureId::generate).clone();

    if collection
        .features
        .iter()
        .any(|entry| stored_id(entry).as_deref() == Some(id.as_str()))
    {
        return Err(ExpresswayError::Conflict { id: id.0 });
    }

    tracing::debug!(id = %id, name = %feature.name, "Appending feature");
    collection.features.push(feature.to_geojson());
    Ok(id)
}

pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}
