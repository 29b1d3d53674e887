use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use expressway_core::models::{Feature, LineGeometry};
use expressway_geo::validate_line;
use expressway_store::collection::{stored_id, stored_name};
use geojson::FeatureCollection;

use crate::dto::{FeatureRequest, SaveResponse};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_expressways(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FeatureCollection>, ApiError> {
    let collection = state
        .store
        .load_collection()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to load expressway data"))?;

    tracing::debug!(features = collection.features.len(), "Listing expressways");
    Ok(Json(collection))
}

/// Look up one stored entry by id, or by name for entries without one
pub async fn get_expressway(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<geojson::Feature>, ApiError> {
    let collection = state
        .store
        .load_collection()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to load expressway data"))?;

    collection
        .features
        .into_iter()
        .find(|entry| {
            stored_id(entry).as_deref() == Some(key.as_str())
                || (stored_id(entry).is_none() && stored_name(entry) == Some(key.as_str()))
        })
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Feature not found in GeoJSON").with_details(key))
}

pub async fn update_expressway(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FeatureRequest>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let (feature, original_name) = parse_feature(body)?;
    tracing::info!(
        name = %feature.name,
        id = ?feature.id,
        original_name = ?original_name,
        vertices = feature.geometry.vertex_count(),
        "Updating expressway"
    );

    let id = state
        .store
        .replace_feature(&feature, original_name.as_deref())
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update expressway data"))?;

    tracing::info!(name = %feature.name, id = %id, "Expressway updated");
    Ok(Json(SaveResponse::success(
        "Expressway updated successfully",
        feature.name,
        id.0,
    )))
}

pub async fn create_expressway(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FeatureRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveResponse>), ApiError> {
    let (feature, _) = parse_feature(body)?;
    tracing::info!(name = %feature.name, "Adding expressway");

    let id = state
        .store
        .append_feature(&feature)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to add expressway data"))?;

    tracing::info!(name = %feature.name, id = %id, "Expressway added");
    Ok((
        StatusCode::CREATED,
        Json(SaveResponse::success("Expressway added successfully", feature.name, id.0)),
    ))
}

/// Extract and check the `feature` member of a write request, along with
/// its `originalName` if one was sent
fn parse_feature(
    body: Result<Json<FeatureRequest>, JsonRejection>,
) -> Result<(Feature, Option<String>), ApiError> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::bad_request("Invalid feature data").with_details(rejection.body_text())
    })?;

    let value = request
        .feature
        .ok_or_else(|| ApiError::bad_request("Invalid feature data"))?;

    let feature = Feature::from_json_value(value)?;
    match &feature.geometry {
        LineGeometry::LineString { coordinates } => validate_line(coordinates)?,
        LineGeometry::MultiLineString { coordinates } => {
            for line in coordinates {
                validate_line(line)?;
            }
        }
    }

    Ok((feature, request.original_name))
}
