use chrono::{DateTime, Utc};
use serde::Serialize;

/// Successful write response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
    pub feature_name: String,
    pub feature_id: String,
    pub saved_at: DateTime<Utc>,
}

impl SaveResponse {
    pub fn success(message: impl Into<String>, feature_name: String, feature_id: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            feature_name,
            feature_id,
            saved_at: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "expressway-api" }
    }
}
