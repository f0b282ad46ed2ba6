//! Student Records
//!
//! Provides the raw record submitted for one prediction request and the
//! explicit coercion rules applied to its values.

mod record;
mod value;

pub mod fields;

pub use record::Record;
pub use value::FieldValue;
