//! Form Schema Routes
//!
//! Everything a client form needs to render its widgets: categorical
//! choices, numeric bounds, initial values and the model column order.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use student_record::Record;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DomainInfo {
    pub field: String,
    /// Allowed values in code order
    pub values: Vec<String>,
    /// Value substituted for anything unrecognized
    pub fallback: String,
}

#[derive(Debug, Serialize)]
pub struct RangeInfo {
    pub field: String,
    pub min: f64,
    pub max: f64,
}

/// Response for schema endpoint
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub domains: Vec<DomainInfo>,
    pub ranges: Vec<RangeInfo>,
    pub defaults: Record,
    pub columns: Vec<String>,
}

/// Get form schema
pub async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaResponse> {
    let domains = state
        .pipeline
        .encoder()
        .table()
        .iter()
        .map(|domain| DomainInfo {
            field: domain.field().to_string(),
            values: domain.values().to_vec(),
            fallback: domain.fallback().to_string(),
        })
        .collect();

    let ranges = state
        .validator
        .config()
        .numeric_ranges()
        .into_iter()
        .map(|(field, (min, max))| RangeInfo {
            field: field.to_string(),
            min,
            max,
        })
        .collect();

    Json(SchemaResponse {
        domains,
        ranges,
        defaults: Record::form_defaults(),
        columns: state.pipeline.layout().columns().to_vec(),
    })
}
