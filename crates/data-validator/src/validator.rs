//! Record Validator for Required Fields and Range Checking

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use student_record::{fields, Record};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Student age (years)
    pub age_range: (f64, f64),
    /// Mother / father education level
    pub parent_education_range: (f64, f64),
    /// Travel time and weekly study time bands
    pub time_band_range: (f64, f64),
    /// Past class failures
    pub failures_range: (f64, f64),
    /// Likert ratings: famrel, freetime, goout, Dalc, Walc, health
    pub rating_range: (f64, f64),
    /// School absences
    pub absences_range: (f64, f64),
    /// Period grades G1 and G2
    pub grade_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (15.0, 22.0),
            parent_education_range: (0.0, 4.0),
            time_band_range: (1.0, 4.0),
            failures_range: (0.0, 4.0),
            rating_range: (1.0, 5.0),
            absences_range: (0.0, 93.0),
            grade_range: (0.0, 20.0),
        }
    }
}

impl ValidationConfig {
    /// Every numeric field paired with its allowed range
    pub fn numeric_ranges(&self) -> Vec<(&'static str, (f64, f64))> {
        vec![
            (fields::AGE, self.age_range),
            (fields::MEDU, self.parent_education_range),
            (fields::FEDU, self.parent_education_range),
            (fields::TRAVELTIME, self.time_band_range),
            (fields::STUDYTIME, self.time_band_range),
            (fields::FAILURES, self.failures_range),
            (fields::FAMREL, self.rating_range),
            (fields::FREETIME, self.rating_range),
            (fields::GOOUT, self.rating_range),
            (fields::DALC, self.rating_range),
            (fields::WALC, self.rating_range),
            (fields::HEALTH, self.rating_range),
            (fields::ABSENCES, self.absences_range),
            (fields::G1, self.grade_range),
            (fields::G2, self.grade_range),
        ]
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for submitted student records
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 || value.is_nan() {
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate age
    pub fn validate_age(&self, age: f64) -> Result<(), ValidationError> {
        self.validate_range(fields::AGE, age, self.config.age_range)
    }

    /// Validate a period grade (`G1` or `G2`)
    pub fn validate_grade(&self, field: &str, grade: f64) -> Result<(), ValidationError> {
        self.validate_range(field, grade, self.config.grade_range)
    }

    /// Validate absences
    pub fn validate_absences(&self, absences: f64) -> Result<(), ValidationError> {
        self.validate_range(fields::ABSENCES, absences, self.config.absences_range)
    }

    /// Validate that a numeric field is present, numeric and in range
    pub fn validate_numeric_field(
        &self,
        record: &Record,
        field: &str,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        let value = record
            .get_present(field)
            .ok_or_else(|| ValidationError::MissingField(field.to_string()))?;
        let number = value.as_f64().ok_or_else(|| {
            ValidationError::InvalidFormat(format!(
                "{} must be numeric, got {} '{}'",
                field,
                value.kind(),
                value
            ))
        })?;
        self.validate_range(field, number, range)
    }

    /// Validate every raw form field is submitted
    ///
    /// Numeric fields need a non-null value. Categorical fields only need
    /// the key: null or unrecognized values there are left to the encoder's
    /// fallback.
    pub fn validate_required(&self, record: &Record) -> Vec<ValidationError> {
        let numeric: Vec<&str> = self
            .config
            .numeric_ranges()
            .into_iter()
            .map(|(field, _)| field)
            .collect();

        fields::RAW_FIELDS
            .iter()
            .filter(|name| {
                if numeric.contains(*name) {
                    record.get_present(name).is_none()
                } else {
                    !record.contains(name)
                }
            })
            .map(|name| ValidationError::MissingField(name.to_string()))
            .collect()
    }

    /// Validate a whole record, collecting every violation
    pub fn validate_record(&self, record: &Record) -> ValidationResult {
        let mut errors = self.validate_required(record);

        let ranges = self.config.numeric_ranges();
        for (field, range) in &ranges {
            // Absent fields were already reported above
            if record.get_present(field).is_none() {
                continue;
            }
            if let Err(e) = self.validate_numeric_field(record, field, *range) {
                errors.push(e);
            }
        }

        let fields_checked = fields::RAW_FIELD_COUNT;
        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            debug!("Record failed validation with {} errors", errors.len());
            ValidationResult::invalid(errors, fields_checked)
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use student_record::FieldValue;

    #[test]
    fn test_form_defaults_are_valid() {
        let validator = Validator::default();
        let result = validator.validate_record(&Record::form_defaults());
        assert!(result.valid, "{:?}", result.errors);
        assert_eq!(result.fields_checked, fields::RAW_FIELD_COUNT);
    }

    #[test]
    fn test_age_range() {
        let validator = Validator::default();
        assert!(validator.validate_age(15.0).is_ok());
        assert!(validator.validate_age(22.0).is_ok());
        assert!(validator.validate_age(14.0).is_err());
        assert!(validator.validate_age(23.0).is_err());
        assert!(validator.validate_age(f64::NAN).is_err());
    }

    #[test]
    fn test_missing_field_reported_once() {
        let validator = Validator::default();
        let record: Record = Record::form_defaults()
            .into_iter()
            .filter(|(name, _)| name != fields::G1)
            .collect();

        let result = validator.validate_record(&record);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![ValidationError::MissingField(fields::G1.to_string())]
        );
    }

    #[test]
    fn test_null_grade_counts_as_missing() {
        let validator = Validator::default();
        let record = Record::form_defaults().with_field(fields::G2, FieldValue::Null);

        let result = validator.validate_record(&record);
        assert_eq!(
            result.errors,
            vec![ValidationError::MissingField(fields::G2.to_string())]
        );
    }

    #[test]
    fn test_malformed_categorical_values_accepted() {
        let validator = Validator::default();
        let record = Record::form_defaults()
            .with_field(fields::ROMANTIC, FieldValue::Null)
            .with_field(fields::SCHOOL, 3)
            .with_field(fields::PAID, true);

        let result = validator.validate_record(&record);
        assert!(result.valid, "{:?}", result.errors);
    }

    #[test]
    fn test_absent_categorical_key_reported() {
        let validator = Validator::default();
        let record: Record = Record::form_defaults()
            .into_iter()
            .filter(|(name, _)| name != fields::SUBJECT)
            .collect();

        assert_eq!(
            validator.validate_record(&record).errors,
            vec![ValidationError::MissingField(fields::SUBJECT.to_string())]
        );
    }

    #[test]
    fn test_non_numeric_grade() {
        let validator = Validator::default();
        let record = Record::form_defaults().with_field(fields::G2, "fourteen");

        let result = validator.validate_record(&record);
        assert!(matches!(
            result.errors.as_slice(),
            [ValidationError::InvalidFormat(msg)] if msg.contains("G2")
        ));
    }

    #[test]
    fn test_unknown_categorical_value_is_not_rejected() {
        let validator = Validator::default();
        let record = Record::form_defaults().with_field(fields::SUBJECT, "Unknown");
        assert!(validator.validate_record(&record).valid);
    }

    #[test]
    fn test_collects_every_violation() {
        let validator = Validator::default();
        let record = Record::form_defaults()
            .with_field(fields::ABSENCES, 120)
            .with_field(fields::HEALTH, 0)
            .with_field(fields::G1, 21);

        let result = validator.validate_record(&record);
        assert_eq!(result.errors.len(), 3);
    }

    proptest! {
        #[test]
        fn grades_in_range_validate(g1 in 0i64..=20, g2 in 0i64..=20) {
            let validator = Validator::default();
            let record = Record::form_defaults().with_field(fields::G1, g1).with_field(fields::G2, g2);
            prop_assert!(validator.validate_record(&record).valid);
        }

        #[test]
        fn grades_above_range_rejected(g1 in 21i64..1000) {
            let validator = Validator::default();
            let record = Record::form_defaults().with_field(fields::G1, g1);
            let result = validator.validate_record(&record);
            prop_assert!(!result.valid);
        }
    }
}
