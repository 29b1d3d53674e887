//! HTTP adapter for a remote expressway server.

use async_trait::async_trait;
use expressway_core::error::{ExpresswayError, Result};
use expressway_core::models::{Feature, FeatureId};
use expressway_core::ports::FeatureStore;
use geojson::FeatureCollection;
use reqwest::StatusCode;
use serde::Deserialize;

const COLLECTION_PATH: &str = "/api/expressways";
const UPDATE_PATH: &str = "/api/update-expressway";

/// `FeatureStore` backed by the expressway HTTP API
///
/// No timeout is set: a hung server leaves the caller waiting.
#[derive(Debug, Clone)]
pub struct HttpFeatureClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveResponse {
    feature_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    details: Option<String>,
}

impl HttpFeatureClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch any GeoJSON FeatureCollection, e.g. province boundaries
    pub async fn fetch_collection(&self, url: &str) -> Result<FeatureCollection> {
        tracing::debug!(%url, "Fetching feature collection");

        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExpresswayError::Transport(format!("GET {} returned {}", url, status)));
        }

        response.json::<FeatureCollection>().await.map_err(transport)
    }

    async fn post_feature(
        &self,
        path: &str,
        feature: &Feature,
        original_name: Option<&str>,
    ) -> Result<FeatureId> {
        let url = format!("{}{}", self.base_url, path);
        let mut body = serde_json::json!({ "feature": feature.to_geojson() });
        if let Some(name) = original_name {
            body["originalName"] = serde_json::Value::from(name);
        }

        let response = self.http.post(&url).json(&body).send().await.map_err(transport)?;
        let status = response.status();

        if status.is_success() {
            let saved: SaveResponse = response.json().await.map_err(transport)?;
            return saved
                .feature_id
                .map(FeatureId)
                .or_else(|| feature.id.clone())
                .ok_or_else(|| {
                    ExpresswayError::Transport("server response did not include an id".to_string())
                });
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(ErrorBody { error, details: Some(details) }) => format!("{}: {}", error, details),
            Ok(ErrorBody { error, details: None }) => error,
            Err(_) => status.to_string(),
        };

        Err(match status {
            StatusCode::BAD_REQUEST => ExpresswayError::MalformedInput { reason: message },
            StatusCode::NOT_FOUND => ExpresswayError::NotFound { key: feature.layer_key() },
            _ => ExpresswayError::Transport(format!("{}: {}", status, message)),
        })
    }
}

#[async_trait]
impl FeatureStore for HttpFeatureClient {
    async fn load_collection(&self) -> Result<FeatureCollection> {
        let url = format!("{}{}", self.base_url, COLLECTION_PATH);
        self.fetch_collection(&url).await
    }

    async fn append_feature(&self, feature: &Feature) -> Result<FeatureId> {
        self.post_feature(COLLECTION_PATH, feature, None).await
    }

    async fn replace_feature(
        &self,
        feature: &Feature,
        match_name: Option<&str>,
    ) -> Result<FeatureId> {
        self.post_feature(UPDATE_PATH, feature, match_name).await
    }
}

fn transport(err: reqwest::Error) -> ExpresswayError {
    ExpresswayError::Transport(err.to_string())
}
