//! Record Map

use crate::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One student's raw attribute values for a single prediction request
///
/// Serializes as a flat JSON object of field name to scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete submission holding the form's initial widget values
    pub fn form_defaults() -> Self {
        use crate::fields::*;

        Self::new()
            .with_field(SCHOOL, "GP")
            .with_field(SEX, "F")
            .with_field(AGE, 17)
            .with_field(ADDRESS, "U")
            .with_field(FAMSIZE, "LE3")
            .with_field(PSTATUS, "T")
            .with_field(MEDU, 0)
            .with_field(FEDU, 0)
            .with_field(MJOB, "teacher")
            .with_field(FJOB, "teacher")
            .with_field(REASON, "home")
            .with_field(GUARDIAN, "mother")
            .with_field(TRAVELTIME, 1)
            .with_field(STUDYTIME, 1)
            .with_field(FAILURES, 0)
            .with_field(SCHOOLSUP, "yes")
            .with_field(FAMSUP, "yes")
            .with_field(PAID, "yes")
            .with_field(ACTIVITIES, "yes")
            .with_field(NURSERY, "yes")
            .with_field(HIGHER, "yes")
            .with_field(INTERNET, "yes")
            .with_field(ROMANTIC, "yes")
            .with_field(FAMREL, 4)
            .with_field(FREETIME, 3)
            .with_field(GOOUT, 3)
            .with_field(DALC, 1)
            .with_field(WALC, 2)
            .with_field(HEALTH, 5)
            .with_field(ABSENCES, 0)
            .with_field(G1, 10)
            .with_field(G2, 10)
            .with_field(SUBJECT, "Math")
    }

    /// Return this record with `name` set, replacing any previous value
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Look up a field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Look up a field, treating an explicit null as absent
    pub fn get_present(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
