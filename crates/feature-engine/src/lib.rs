//! Feature Engineering Engine
//!
//! Turns a raw student record into the numeric feature row a trained
//! classifier expects: derived grade/education features first, then
//! label encoding of the categorical fields against fixed domains.

mod deriver;
mod domain;
mod encoder;
mod error;
mod vector;

pub use deriver::FeatureDeriver;
pub use domain::{CategoricalDomain, DomainTable, BINARY_DOMAINS, NOMINAL_DOMAINS};
pub use encoder::CategoryEncoder;
pub use error::FeatureError;
pub use vector::{EncodedVector, FeatureLayout};
