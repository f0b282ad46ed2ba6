//! Categorical Domains

use crate::FeatureError;
use serde::Serialize;
use std::collections::BTreeMap;
use student_record::fields;
use tracing::info;

/// Binary categorical fields and their allowed values
pub const BINARY_DOMAINS: [(&str, &[&str]); 14] = [
    (fields::SCHOOL, &["GP", "MS"]),
    (fields::SEX, &["F", "M"]),
    (fields::ADDRESS, &["U", "R"]),
    (fields::FAMSIZE, &["LE3", "GT3"]),
    (fields::PSTATUS, &["T", "A"]),
    (fields::SCHOOLSUP, &["yes", "no"]),
    (fields::FAMSUP, &["yes", "no"]),
    (fields::PAID, &["yes", "no"]),
    (fields::ACTIVITIES, &["yes", "no"]),
    (fields::NURSERY, &["yes", "no"]),
    (fields::HIGHER, &["yes", "no"]),
    (fields::INTERNET, &["yes", "no"]),
    (fields::ROMANTIC, &["yes", "no"]),
    (fields::SUBJECT, &["Math", "Portuguese"]),
];

/// Multi-valued categorical fields and their allowed values
pub const NOMINAL_DOMAINS: [(&str, &[&str]); 4] = [
    (fields::MJOB, &["teacher", "health", "services", "at_home", "other"]),
    (fields::FJOB, &["teacher", "health", "services", "at_home", "other"]),
    (fields::REASON, &["home", "reputation", "course", "other"]),
    (fields::GUARDIAN, &["mother", "father", "other"]),
];

/// Fixed vocabulary of one categorical field
///
/// Values are kept sorted ascending by ordinal string comparison; a value's
/// code is its position in that order. The first value is the fallback
/// substituted for anything outside the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalDomain {
    field: String,
    values: Vec<String>,
}

impl CategoricalDomain {
    /// Build a domain from its declared values, in any order
    pub fn new<I, S>(field: &str, values: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(FeatureError::EmptyDomain(field.to_string()));
        }
        Ok(Self::from_values(field, values))
    }

    fn from_values(field: &str, mut values: Vec<String>) -> Self {
        values.sort();
        values.dedup();
        Self {
            field: field.to_string(),
            values,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Sorted values; index equals code
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The lexicographically smallest value
    pub fn fallback(&self) -> &str {
        &self.values[0]
    }

    pub fn contains(&self, value: &str) -> bool {
        self.code_of(value).is_some()
    }

    /// Code of a member value
    pub fn code_of(&self, value: &str) -> Option<usize> {
        self.values
            .binary_search_by(|probe| probe.as_str().cmp(value))
            .ok()
    }

    /// Code of a value, substituting the fallback for non-members
    pub fn encode(&self, value: &str) -> usize {
        self.code_of(value).unwrap_or(0)
    }

    /// Value for a code
    pub fn decode(&self, code: usize) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Immutable table of categorical domains keyed by field name
///
/// Built once at startup and shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DomainTable {
    domains: BTreeMap<String, CategoricalDomain>,
}

impl DomainTable {
    /// Build a table from `(field, values)` declarations
    pub fn from_declarations<'a, I>(declarations: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let mut domains = BTreeMap::new();
        for (field, values) in declarations {
            let domain = CategoricalDomain::new(field, values.iter().copied())?;
            domains.insert(field.to_string(), domain);
        }
        Ok(Self { domains })
    }

    /// The binary yes/no style fields only
    pub fn binary() -> Self {
        Self::from_constants(BINARY_DOMAINS.iter().copied())
    }

    /// Every categorical field the student form collects
    pub fn standard() -> Self {
        let table = Self::from_constants(
            BINARY_DOMAINS
                .iter()
                .chain(NOMINAL_DOMAINS.iter())
                .copied(),
        );
        info!("Built categorical domain table with {} fields", table.len());
        table
    }

    fn from_constants<'a>(declarations: impl Iterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let domains = declarations
            .map(|(field, values)| {
                let values = values.iter().map(|v| v.to_string()).collect();
                (field.to_string(), CategoricalDomain::from_values(field, values))
            })
            .collect();
        Self { domains }
    }

    pub fn get(&self, field: &str) -> Option<&CategoricalDomain> {
        self.domains.get(field)
    }

    /// Registered field names in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoricalDomain> {
        self.domains.values()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_sorted_order() {
        let domain = CategoricalDomain::new("address", ["U", "R"]).unwrap();
        assert_eq!(domain.values(), ["R", "U"]);
        assert_eq!(domain.code_of("R"), Some(0));
        assert_eq!(domain.code_of("U"), Some(1));
        assert_eq!(domain.fallback(), "R");
    }

    #[test]
    fn test_unknown_value_takes_fallback_code() {
        let domain = CategoricalDomain::new("subject", ["Math", "Portuguese"]).unwrap();
        assert_eq!(domain.encode("Unknown"), 0);
        assert_eq!(domain.decode(0), Some("Math"));
    }

    #[test]
    fn test_ordinal_comparison_is_case_sensitive() {
        // Upper case sorts before lower case
        let domain = CategoricalDomain::new("x", ["apple", "Zebra"]).unwrap();
        assert_eq!(domain.fallback(), "Zebra");
    }

    #[test]
    fn test_empty_domain_rejected() {
        let result = CategoricalDomain::new("school", Vec::<String>::new());
        assert_eq!(result, Err(FeatureError::EmptyDomain("school".to_string())));
    }

    #[test]
    fn test_standard_table() {
        let table = DomainTable::standard();
        assert_eq!(table.len(), BINARY_DOMAINS.len() + NOMINAL_DOMAINS.len());

        let mjob = table.get(fields::MJOB).unwrap();
        assert_eq!(
            mjob.values(),
            ["at_home", "health", "other", "services", "teacher"]
        );
        assert_eq!(table.get(fields::FAMSIZE).unwrap().fallback(), "GT3");
        assert_eq!(table.get(fields::PSTATUS).unwrap().fallback(), "A");
        assert_eq!(table.get(fields::PAID).unwrap().fallback(), "no");
    }

    #[test]
    fn test_binary_table_matches_declarations() {
        let table = DomainTable::binary();
        assert_eq!(table.len(), 14);
        assert!(table.get(fields::MJOB).is_none());
    }

    #[test]
    fn test_from_declarations() {
        let table = DomainTable::from_declarations([("sex", &["M", "F"][..])]).unwrap();
        assert_eq!(table.get("sex").unwrap().values(), ["F", "M"]);
    }
}
