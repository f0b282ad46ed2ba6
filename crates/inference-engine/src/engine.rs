//! Inference Engine Implementation

use crate::{ClassProbabilities, OnnxPredictor, PredictionError, Predictor, StaticPredictor};
use tracing::{debug, info, warn};

enum ModelState {
    Loaded(Box<dyn Predictor>),
    Failed(String),
}

/// Holds the classifier loaded once at startup
///
/// A failed load is kept rather than aborting: every prediction then
/// fails with the original load error so callers see why.
pub struct InferenceEngine {
    /// Model path
    model_path: String,
    state: ModelState,
}

impl InferenceEngine {
    /// Load an ONNX model, recording the failure if it cannot be loaded
    pub fn load(model_path: &str, width: usize, probability_output: usize) -> Self {
        info!("Creating inference engine with model: {}", model_path);

        let state = match OnnxPredictor::load(model_path, width, probability_output) {
            Ok(predictor) => ModelState::Loaded(Box::new(predictor)),
            Err(e) => {
                warn!("Model unavailable: {}", e);
                ModelState::Failed(e.to_string())
            }
        };

        Self {
            model_path: model_path.to_string(),
            state,
        }
    }

    /// Wrap an already constructed predictor
    pub fn with_predictor(predictor: Box<dyn Predictor>) -> Self {
        info!("Creating inference engine with predictor: {}", predictor.name());
        Self {
            model_path: predictor.name().to_string(),
            state: ModelState::Loaded(predictor),
        }
    }

    /// Create a mock inference engine returning fixed probabilities
    pub fn mock(fail: f64, pass: f64) -> Self {
        Self::with_predictor(Box::new(StaticPredictor::new(fail, pass)))
    }

    /// Create an engine whose model could not be loaded
    pub fn unavailable(model_path: &str, reason: impl Into<String>) -> Self {
        Self {
            model_path: model_path.to_string(),
            state: ModelState::Failed(reason.into()),
        }
    }

    /// Run inference on a single feature row
    pub fn predict(&self, row: &[f32]) -> Result<ClassProbabilities, PredictionError> {
        let predictor = match &self.state {
            ModelState::Loaded(predictor) => predictor,
            ModelState::Failed(reason) => {
                return Err(PredictionError::ModelLoadError(reason.clone()));
            }
        };

        let probabilities = predictor.predict_proba(row)?;
        debug!(
            "Prediction: pass={:.3}, fail={:.3}",
            probabilities.pass, probabilities.fail
        );
        Ok(probabilities)
    }

    /// Check if engine is loaded
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ModelState::Loaded(_))
    }

    /// Load failure message, if any
    pub fn load_error(&self) -> Option<&str> {
        match &self.state {
            ModelState::Failed(reason) => Some(reason),
            ModelState::Loaded(_) => None,
        }
    }

    /// Input width fixed by the model, if known
    pub fn input_width(&self) -> Option<usize> {
        match &self.state {
            ModelState::Loaded(predictor) => predictor.input_width(),
            ModelState::Failed(_) => None,
        }
    }

    /// Get model path
    pub fn model_path(&self) -> &str {
        &self.model_path
    }
}
