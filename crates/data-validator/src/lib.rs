//! Record Validation
//!
//! Provides required-field and range checking for student records at the
//! submission boundary. Categorical values are deliberately left alone.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
