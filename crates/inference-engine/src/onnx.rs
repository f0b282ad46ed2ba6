//! tract-backed ONNX Classifier

use crate::{ClassProbabilities, PredictionError, Predictor};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Binary classifier exported to ONNX and optimized with tract
///
/// The input is fixed to `f32[1, width]`. Classifiers exported from
/// scikit-learn emit `(label, probabilities)`, so the probability tensor is
/// read from a configurable output index.
pub struct OnnxPredictor {
    plan: OnnxPlan,
    width: usize,
    probability_output: usize,
    name: String,
}

impl OnnxPredictor {
    /// Load and optimize a model from disk
    pub fn load(
        path: impl AsRef<Path>,
        width: usize,
        probability_output: usize,
    ) -> Result<Self, PredictionError> {
        let path = path.as_ref();
        info!("Loading ONNX model from {} (width={})", path.display(), width);

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, width]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                PredictionError::ModelLoadError(format!("{}: {}", path.display(), e))
            })?;

        let outputs = plan.model().outputs.len();
        if probability_output >= outputs {
            return Err(PredictionError::ModelLoadError(format!(
                "{}: probability output {} requested but model has {} outputs",
                path.display(),
                probability_output,
                outputs
            )));
        }

        info!("Model loaded successfully ({} outputs)", outputs);
        Ok(Self {
            plan,
            width,
            probability_output,
            name: path.display().to_string(),
        })
    }
}

impl Predictor for OnnxPredictor {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_width(&self) -> Option<usize> {
        Some(self.width)
    }

    fn predict_proba(&self, row: &[f32]) -> Result<ClassProbabilities, PredictionError> {
        if row.len() != self.width {
            return Err(PredictionError::InvalidInputShape {
                expected: format!("[1, {}]", self.width),
                actual: format!("[1, {}]", row.len()),
            });
        }

        let input = Tensor::from_shape(&[1, self.width], row)
            .map_err(|e| PredictionError::InferenceFailed(e.to_string()))?;
        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| PredictionError::InferenceFailed(e.to_string()))?;

        let probabilities = outputs
            .get(self.probability_output)
            .ok_or_else(|| {
                PredictionError::UnexpectedOutput(format!(
                    "missing output {}",
                    self.probability_output
                ))
            })?
            .to_array_view::<f32>()
            .map_err(|e| PredictionError::UnexpectedOutput(e.to_string()))?
            .iter()
            .copied()
            .collect::<Vec<f32>>();

        debug!("Raw class probabilities: {:?}", probabilities);
        ClassProbabilities::from_outputs(&probabilities)
    }
}
