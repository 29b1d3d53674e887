//! Error types for the expressway editor

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpresswayError {
    // Editing errors
    #[error("A line needs at least {minimum} points; it currently has {current}")]
    ConstraintViolation { minimum: usize, current: usize },

    #[error("Invalid coordinate at index {index}: {reason}")]
    InvalidCoordinate { index: usize, reason: String },

    #[error("No feature is being edited")]
    NoActiveSession,

    #[error("Not in drawing mode")]
    NotDrawing,

    #[error("Vertex marker {marker} does not exist")]
    UnknownMarker { marker: u64 },

    // Store errors
    #[error("Feature not found: {key}")]
    NotFound { key: String },

    #[error("Feature name '{name}' matches {count} features without an id")]
    AmbiguousMatch { name: String, count: usize },

    #[error("Feature already exists: {id}")]
    Conflict { id: String },

    #[error("Malformed feature: {reason}")]
    MalformedInput { reason: String },

    #[error("Data file is not a GeoJSON FeatureCollection: {path}")]
    NotACollection { path: PathBuf },

    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ExpresswayError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput { reason: reason.into() }
    }

    /// Errors the user can recover from locally without a round trip
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::ConstraintViolation { .. }
                | Self::InvalidCoordinate { .. }
                | Self::NoActiveSession
                | Self::NotDrawing
                | Self::UnknownMarker { .. }
        )
    }
}

impl From<serde_json::Error> for ExpresswayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExpresswayError>;
