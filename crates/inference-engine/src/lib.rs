//! ONNX Inference Engine
//!
//! Runs the trained pass/fail classifier over encoded student features
//! using tract-onnx, and ties the feature pipeline to the predictor.

mod engine;
mod onnx;
mod pipeline;
mod predictor;

pub use engine::InferenceEngine;
pub use onnx::OnnxPredictor;
pub use pipeline::{GradePipeline, GradePrediction, PipelineError};
pub use predictor::{ClassProbabilities, Predictor, StaticPredictor, FAIL_CLASS, PASS_CLASS};

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Unexpected model output: {0}")]
    UnexpectedOutput(String),
}
