//! Record-to-Probability Pipeline

use crate::{InferenceEngine, PredictionError};
use feature_engine::{
    CategoryEncoder, DomainTable, EncodedVector, FeatureDeriver, FeatureError, FeatureLayout,
};
use serde::Serialize;
use std::sync::Arc;
use student_record::Record;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from a single pipeline run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The submitted record could not be turned into features
    #[error(transparent)]
    Feature(#[from] FeatureError),

    /// The predictor failed
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictionError),
}

/// Outcome of one prediction request
#[derive(Debug, Clone, Serialize)]
pub struct GradePrediction {
    /// Probability of the "pass" class
    pub pass_probability: f64,
    /// Probability of the "fail" class
    pub fail_probability: f64,
    /// Encoded features handed to the model
    pub features: EncodedVector,
    /// Inference latency in milliseconds
    pub latency_ms: u64,
}

/// Derivation, encoding and inference for one record at a time
///
/// Holds only read-only state after construction.
pub struct GradePipeline {
    deriver: FeatureDeriver,
    encoder: CategoryEncoder,
    layout: FeatureLayout,
    engine: InferenceEngine,
}

impl GradePipeline {
    pub fn new(encoder: CategoryEncoder, layout: FeatureLayout, engine: InferenceEngine) -> Self {
        info!(
            "Pipeline ready: {} categorical fields, {} columns, model={}",
            encoder.fields().len(),
            layout.width(),
            engine.model_path()
        );
        Self {
            deriver: FeatureDeriver::new(),
            encoder,
            layout,
            engine,
        }
    }

    /// Standard domain table and default column layout
    pub fn standard(engine: InferenceEngine) -> Self {
        let table = Arc::new(DomainTable::standard());
        Self::new(CategoryEncoder::all(table), FeatureLayout::default(), engine)
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Derive and encode a record without running the model
    pub fn encode(&self, record: &Record) -> Result<EncodedVector, FeatureError> {
        let derived = self.deriver.derive(record)?;
        let encoded = self.encoder.encode(&derived);
        EncodedVector::from_record(&encoded, &self.layout)
    }

    /// Run the full pipeline and report the passing probability
    pub fn predict(&self, record: &Record) -> Result<GradePrediction, PipelineError> {
        let start = std::time::Instant::now();

        let features = self.encode(record).map_err(|e| match e {
            FeatureError::MissingColumn(column) => {
                PipelineError::Prediction(PredictionError::InvalidInputShape {
                    expected: format!("{} columns including {}", self.layout.width(), column),
                    actual: format!("record without {}", column),
                })
            }
            other => PipelineError::Feature(other),
        })?;
        let row = features
            .to_row(&self.layout)
            .map_err(|e| PredictionError::InferenceFailed(e.to_string()))?;

        let probabilities = self.engine.predict(&row)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        debug!("Pipeline completed in {}ms", latency_ms);

        Ok(GradePrediction {
            pass_probability: probabilities.pass,
            fail_probability: probabilities.fail,
            features,
            latency_ms,
        })
    }
}
