use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use expressway_core::error::ExpresswayError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Map a store error, using `context` as the message for server faults
    pub fn from_store(err: ExpresswayError, context: &str) -> Self {
        let details = err.to_string();
        match err {
            ExpresswayError::MalformedInput { .. }
            | ExpresswayError::InvalidCoordinate { .. }
            | ExpresswayError::ConstraintViolation { .. } => {
                Self::bad_request("Invalid feature data").with_details(details)
            }
            ExpresswayError::NotFound { .. } => {
                Self::not_found("Feature not found in GeoJSON").with_details(details)
            }
            ExpresswayError::AmbiguousMatch { .. } => {
                Self::conflict("Feature name is ambiguous").with_details(details)
            }
            ExpresswayError::Conflict { .. } => {
                Self::conflict("Feature already exists").with_details(details)
            }
            _ => {
                tracing::error!(error = %details, "{}", context);
                Self::internal(context).with_details(details)
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ExpresswayError> for ApiError {
    fn from(err: ExpresswayError) -> Self {
        Self::from_store(err, "Internal error")
    }
}
