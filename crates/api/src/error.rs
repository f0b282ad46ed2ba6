//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use feature_engine::FeatureError;
use inference_engine::{PipelineError, PredictionError};
use serde::Serialize;
use thiserror::Error;

/// Errors returned to API callers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Submitted record violates the form's ranges
    #[error("Record failed validation with {} errors", .0.len())]
    Validation(Vec<ValidationError>),

    /// Record could not be turned into features
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// The predictor failed
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Feature(e) => ApiError::Feature(e),
            PipelineError::Prediction(e) => ApiError::Prediction(e),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Feature(_) => StatusCode::BAD_REQUEST,
            ApiError::Prediction(PredictionError::ModelLoadError(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = match &self {
            ApiError::Validation(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        };
        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (self.status(), Json(body)).into_response()
    }
}
