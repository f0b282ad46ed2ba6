//! Encoded Feature Vector Assembly

use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use student_record::{fields, Record};
use tracing::debug;

/// Fully numeric feature representation of one record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedVector {
    values: BTreeMap<String, f64>,
}

impl EncodedVector {
    /// Build from a derived and encoded record, keeping the layout's columns
    ///
    /// Every layout column must hold a number by now; text there means a
    /// categorical field was left unencoded. Fields outside the layout are
    /// ignored whatever their type.
    pub fn from_record(record: &Record, layout: &FeatureLayout) -> Result<Self, FeatureError> {
        let values = layout
            .columns()
            .iter()
            .map(|column| {
                let value = record
                    .get(column)
                    .ok_or_else(|| FeatureError::MissingColumn(column.clone()))?;
                value
                    .as_f64()
                    .map(|v| (column.clone(), v))
                    .ok_or_else(|| FeatureError::NonNumericField {
                        field: column.clone(),
                        kind: value.kind(),
                    })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        if record.len() > values.len() {
            debug!(
                "Ignored {} fields not in the feature layout",
                record.len() - values.len()
            );
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Lay the values out as a single model input row
    pub fn to_row(&self, layout: &FeatureLayout) -> Result<Vec<f32>, FeatureError> {
        layout
            .columns()
            .iter()
            .map(|column| {
                self.get(column)
                    .map(|v| v as f32)
                    .ok_or_else(|| FeatureError::MissingColumn(column.clone()))
            })
            .collect()
    }
}

/// Ordered column set a model was trained on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureLayout {
    columns: Vec<String>,
}

impl FeatureLayout {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns in a row
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

impl Default for FeatureLayout {
    /// Raw form fields in submission order followed by the derived fields
    fn default() -> Self {
        Self::new(fields::RAW_FIELDS.iter().chain(fields::DERIVED_FIELDS.iter()).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryEncoder, DomainTable, FeatureDeriver};
    use std::sync::Arc;
    use student_record::FieldValue;

    fn encoded(record: &Record) -> Record {
        let derived = FeatureDeriver::new().derive(record).unwrap();
        CategoryEncoder::all(Arc::new(DomainTable::standard())).encode(&derived)
    }

    fn encoded_defaults() -> EncodedVector {
        EncodedVector::from_record(&encoded(&Record::form_defaults()), &FeatureLayout::default())
            .unwrap()
    }

    #[test]
    fn test_default_layout() {
        let layout = FeatureLayout::default();
        assert_eq!(layout.width(), 36);
        assert_eq!(layout.columns()[0], "school");
        assert_eq!(layout.columns()[32], "subject");
        assert_eq!(&layout.columns()[33..], ["change", "G", "Pedu"]);
    }

    #[test]
    fn test_full_record_is_numeric() {
        let vector = encoded_defaults();
        assert_eq!(vector.len(), 36);
        assert_eq!(vector.get(fields::AGE), Some(17.0));
        assert_eq!(vector.get(fields::MJOB), Some(4.0));
        assert_eq!(vector.get(fields::GRADE_MEAN), Some(10.0));
    }

    #[test]
    fn test_row_follows_layout_order() {
        let vector = encoded_defaults();
        let layout = FeatureLayout::new([fields::G2, fields::AGE, fields::CHANGE]);
        assert_eq!(vector.to_row(&layout).unwrap(), vec![10.0, 17.0, 0.0]);
    }

    #[test]
    fn test_missing_column() {
        let vector = encoded_defaults();
        let layout = FeatureLayout::new(["studytime", "hobbies"]);
        assert_eq!(
            vector.to_row(&layout),
            Err(FeatureError::MissingColumn("hobbies".to_string()))
        );
    }

    #[test]
    fn test_absent_layout_column() {
        let record = Record::new().with_field(fields::AGE, 17);
        let layout = FeatureLayout::new([fields::AGE, fields::ABSENCES]);
        assert_eq!(
            EncodedVector::from_record(&record, &layout),
            Err(FeatureError::MissingColumn("absences".to_string()))
        );
    }

    #[test]
    fn test_unencoded_text_rejected() {
        let record = Record::new().with_field(fields::AGE, 17).with_field(fields::MJOB, "teacher");
        let layout = FeatureLayout::new([fields::AGE, fields::MJOB]);
        assert!(matches!(
            EncodedVector::from_record(&record, &layout),
            Err(FeatureError::NonNumericField { kind: "text", .. })
        ));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let record = Record::form_defaults()
            .with_field("student_name", "Alice")
            .with_field("notes", FieldValue::Null);
        let vector =
            EncodedVector::from_record(&encoded(&record), &FeatureLayout::default()).unwrap();

        assert_eq!(vector.len(), 36);
        assert_eq!(vector.get("student_name"), None);
        assert_eq!(vector, encoded_defaults());
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let record = Record::new().with_field(fields::G1, 12).with_field(fields::SCHOOL, "GP");
        let vector = EncodedVector::from_record(&record, &FeatureLayout::new([fields::G1])).unwrap();
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, r#"{"G1":12.0}"#);
    }
}
