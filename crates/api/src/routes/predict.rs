//! Prediction Routes

use axum::{extract::State, Json};
use metrics::{counter, histogram};
use std::sync::Arc;
use student_record::Record;
use tracing::{info, warn};

use crate::{ApiError, AppState};
use inference_engine::GradePrediction;

/// Score one submitted record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(record): Json<Record>,
) -> Result<Json<GradePrediction>, ApiError> {
    counter!("predictions_total").increment(1);

    let result = score(&state, &record);
    match &result {
        Ok(prediction) => {
            histogram!("prediction_latency_ms").record(prediction.latency_ms as f64);
            info!(
                "Passing probability {:.3} ({}ms)",
                prediction.pass_probability, prediction.latency_ms
            );
        }
        Err(e) => {
            counter!("prediction_failures_total").increment(1);
            warn!("Prediction request rejected: {}", e);
        }
    }

    result.map(Json)
}

fn score(state: &AppState, record: &Record) -> Result<GradePrediction, ApiError> {
    if state.validate {
        let validation = state.validator.validate_record(record);
        if !validation.valid {
            return Err(ApiError::Validation(validation.errors));
        }
    }

    Ok(state.pipeline.predict(record)?)
}

/// Encode a record without scoring it
pub async fn encode(
    State(state): State<Arc<AppState>>,
    Json(record): Json<Record>,
) -> Result<Json<feature_engine::EncodedVector>, ApiError> {
    Ok(Json(state.pipeline.encode(&record)?))
}
