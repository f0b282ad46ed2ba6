//! Predictor Abstraction

use crate::PredictionError;
use serde::{Deserialize, Serialize};

/// Output index of the "fail" class
pub const FAIL_CLASS: usize = 0;
/// Output index of the "pass" class
pub const PASS_CLASS: usize = 1;

/// Binary class distribution returned by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub fail: f64,
    pub pass: f64,
}

impl ClassProbabilities {
    pub fn new(fail: f64, pass: f64) -> Self {
        Self { fail, pass }
    }

    /// Interpret a raw `[fail, pass]` model output
    pub fn from_outputs(outputs: &[f32]) -> Result<Self, PredictionError> {
        if outputs.len() != 2 {
            return Err(PredictionError::UnexpectedOutput(format!(
                "expected 2 class probabilities, got {}",
                outputs.len()
            )));
        }
        if outputs.iter().any(|p| !p.is_finite()) {
            return Err(PredictionError::UnexpectedOutput(format!(
                "non-finite probabilities {:?}",
                outputs
            )));
        }

        Ok(Self {
            fail: outputs[FAIL_CLASS] as f64,
            pass: outputs[PASS_CLASS] as f64,
        })
    }
}

/// A loaded binary classifier
///
/// Implementations hold no mutable state so one instance can serve any
/// number of concurrent requests.
pub trait Predictor: Send + Sync {
    /// Short description for logs and health reporting
    fn name(&self) -> &str;

    /// Number of input columns, when the model fixes it
    fn input_width(&self) -> Option<usize>;

    /// Class probabilities for a single feature row
    fn predict_proba(&self, row: &[f32]) -> Result<ClassProbabilities, PredictionError>;
}

/// Predictor returning a fixed distribution, for development and tests
#[derive(Debug, Clone)]
pub struct StaticPredictor {
    probabilities: ClassProbabilities,
}

impl StaticPredictor {
    pub fn new(fail: f64, pass: f64) -> Self {
        Self {
            probabilities: ClassProbabilities::new(fail, pass),
        }
    }
}

impl Predictor for StaticPredictor {
    fn name(&self) -> &str {
        "static"
    }

    fn input_width(&self) -> Option<usize> {
        None
    }

    fn predict_proba(&self, row: &[f32]) -> Result<ClassProbabilities, PredictionError> {
        if row.is_empty() {
            return Err(PredictionError::InvalidInputShape {
                expected: "at least one feature".to_string(),
                actual: "empty row".to_string(),
            });
        }
        Ok(self.probabilities)
    }
}
