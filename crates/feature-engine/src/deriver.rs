//! Derived Feature Computation

use crate::FeatureError;
use student_record::{fields, Record};
use tracing::debug;

/// Computes engineered features from period grades and parental education
///
/// Adds `change = G2 - G1`, `G = (G1 + G2) / 2` and
/// `Pedu = (Medu + Fedu) / 2`. Inputs are not range-checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureDeriver;

impl FeatureDeriver {
    pub fn new() -> Self {
        Self
    }

    /// Return a copy of `record` with the derived fields added
    pub fn derive(&self, record: &Record) -> Result<Record, FeatureError> {
        let g1 = numeric_field(record, fields::G1)?;
        let g2 = numeric_field(record, fields::G2)?;
        let medu = numeric_field(record, fields::MEDU)?;
        let fedu = numeric_field(record, fields::FEDU)?;

        let change = g2 - g1;
        let grade_mean = (g1 + g2) / 2.0;
        let parent_education = (medu + fedu) / 2.0;

        debug!(
            "Derived features: change={}, G={}, Pedu={}",
            change, grade_mean, parent_education
        );

        let mut derived = record.clone();
        derived.insert(fields::CHANGE, change);
        derived.insert(fields::GRADE_MEAN, grade_mean);
        derived.insert(fields::PARENT_EDUCATION, parent_education);
        Ok(derived)
    }
}

fn numeric_field(record: &Record, field: &str) -> Result<f64, FeatureError> {
    let value = record
        .get_present(field)
        .ok_or_else(|| FeatureError::MissingField(field.to_string()))?;
    value.as_f64().ok_or_else(|| FeatureError::NonNumericField {
        field: field.to_string(),
        kind: value.kind(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use student_record::FieldValue;

    fn grades(g1: i64, g2: i64, medu: i64, fedu: i64) -> Record {
        Record::new()
            .with_field(fields::G1, g1)
            .with_field(fields::G2, g2)
            .with_field(fields::MEDU, medu)
            .with_field(fields::FEDU, fedu)
    }

    fn number(record: &Record, field: &str) -> f64 {
        record.get(field).and_then(FieldValue::as_f64).unwrap()
    }

    #[test]
    fn test_derived_values() {
        let derived = FeatureDeriver::new().derive(&grades(10, 14, 2, 4)).unwrap();

        assert_eq!(number(&derived, fields::CHANGE), 4.0);
        assert_eq!(number(&derived, fields::GRADE_MEAN), 12.0);
        assert_eq!(number(&derived, fields::PARENT_EDUCATION), 3.0);
    }

    #[test]
    fn test_missing_g1() {
        let record = Record::new()
            .with_field(fields::G2, 14)
            .with_field(fields::MEDU, 2)
            .with_field(fields::FEDU, 4);

        let result = FeatureDeriver::new().derive(&record);
        assert_eq!(result, Err(FeatureError::MissingField("G1".to_string())));
    }

    #[test]
    fn test_non_numeric_grade() {
        let record = grades(10, 14, 2, 4).with_field(fields::G2, "14");
        let result = FeatureDeriver::new().derive(&record);
        assert!(matches!(
            result,
            Err(FeatureError::NonNumericField { kind: "text", .. })
        ));
    }

    #[test]
    fn test_existing_fields_untouched() {
        let record = grades(10, 14, 2, 4).with_field(fields::SCHOOL, "MS");
        let derived = FeatureDeriver::new().derive(&record).unwrap();

        assert_eq!(derived.len(), record.len() + 3);
        for (name, value) in record.iter() {
            assert_eq!(derived.get(name), Some(value));
        }
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let derived = FeatureDeriver::new().derive(&grades(-5, 30, 9, 9)).unwrap();
        assert_eq!(number(&derived, fields::CHANGE), 35.0);
        assert_eq!(number(&derived, fields::PARENT_EDUCATION), 9.0);
    }

    proptest! {
        #[test]
        fn derived_arithmetic_is_exact(
            g1 in 0.0f64..=20.0,
            g2 in 0.0f64..=20.0,
            medu in 0.0f64..=4.0,
            fedu in 0.0f64..=4.0,
        ) {
            let record = Record::new()
                .with_field(fields::G1, g1)
                .with_field(fields::G2, g2)
                .with_field(fields::MEDU, medu)
                .with_field(fields::FEDU, fedu);
            let derived = FeatureDeriver::new().derive(&record).unwrap();

            prop_assert_eq!(number(&derived, fields::CHANGE), g2 - g1);
            prop_assert_eq!(number(&derived, fields::GRADE_MEAN), (g1 + g2) / 2.0);
            prop_assert_eq!(number(&derived, fields::PARENT_EDUCATION), (medu + fedu) / 2.0);
        }
    }
}
