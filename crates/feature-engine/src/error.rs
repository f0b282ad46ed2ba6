//! Feature Error Types

use thiserror::Error;

/// Errors during feature derivation and encoding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Required raw field absent before derivation
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Field holds a value that cannot be used as a number
    #[error("Field {field} is not numeric (got {kind})")]
    NonNumericField { field: String, kind: &'static str },

    /// Encoder configured for a field with no registered domain
    #[error("No categorical domain registered for field: {0}")]
    UnknownFieldConfiguration(String),

    /// Domain declared without any values
    #[error("Categorical domain for {0} is empty")]
    EmptyDomain(String),

    /// Column required by the feature layout is absent
    #[error("Feature column missing: {0}")]
    MissingColumn(String),
}
