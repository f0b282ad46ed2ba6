//! Categorical Label Encoding

use crate::{CategoricalDomain, DomainTable, FeatureError};
use std::sync::Arc;
use student_record::Record;
use tracing::debug;

/// Replaces categorical values with their stable integer codes
///
/// Values outside a field's domain are silently replaced by the domain's
/// fallback before encoding. Unknown values never produce an error.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    table: Arc<DomainTable>,
    fields: Vec<String>,
}

impl CategoryEncoder {
    /// Create an encoder for the given fields
    ///
    /// Fails if any field has no registered domain in `table`.
    pub fn new<I, S>(table: Arc<DomainTable>, fields: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if let Some(unknown) = fields.iter().find(|f| table.get(f).is_none()) {
            return Err(FeatureError::UnknownFieldConfiguration(unknown.clone()));
        }
        Ok(Self { table, fields })
    }

    /// Create an encoder covering every field registered in `table`
    pub fn all(table: Arc<DomainTable>) -> Self {
        let fields = table.fields().map(str::to_string).collect();
        Self { table, fields }
    }

    /// Fields this encoder rewrites
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn table(&self) -> &DomainTable {
        &self.table
    }

    /// Return a copy of `record` with every configured categorical field
    /// replaced by its integer code
    ///
    /// Configured fields absent from the record are left absent.
    pub fn encode(&self, record: &Record) -> Record {
        let mut encoded = record.clone();

        for (field, domain) in self.domains() {
            let Some(value) = record.get(field) else {
                debug!("Categorical field {} absent, skipping", field);
                continue;
            };

            let label = value.to_category();
            let code = match domain.code_of(&label) {
                Some(code) => code,
                None => {
                    debug!(
                        "Unknown value '{}' for {}, substituting '{}'",
                        label,
                        field,
                        domain.fallback()
                    );
                    0
                }
            };
            encoded.insert(field, code as i64);
        }

        encoded
    }

    /// Recover the label for a code produced by this encoder
    pub fn decode(&self, field: &str, code: usize) -> Option<&str> {
        if !self.fields.iter().any(|f| f == field) {
            return None;
        }
        self.table.get(field)?.decode(code)
    }

    fn domains(&self) -> impl Iterator<Item = (&str, &CategoricalDomain)> {
        // Construction guarantees every configured field has a domain
        self.fields
            .iter()
            .filter_map(|f| self.table.get(f).map(|d| (f.as_str(), d)))
    }
}
