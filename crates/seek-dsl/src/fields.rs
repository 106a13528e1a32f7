//! Weighted search fields.
//!
//! Queries without a field scope search a configured list of fields, each with a relative
//! weight. Fields are written as `name^weight`, or just `name` for a weight of 1.

use std::{fmt, str::FromStr};

use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::error::DslError;

/// Default field weights for search ranking.
pub mod weight {
    /// Title field weight (3.0x).
    pub const TITLE: f32 = 3.0;
    /// Tags field weight (2.5x).
    pub const TAGS: f32 = 2.5;
    /// Path field weight (2.0x).
    pub const PATH: f32 = 2.0;
    /// Body field weight (1.0x).
    pub const BODY: f32 = 1.0;
}

/// A field name with a relative weight.
#[derive(Debug, Clone, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct WeightedField {
    /// Field name as known to the backend.
    pub name: String,
    /// Relative weight; 1.0 is neutral.
    pub weight: f32,
}

impl WeightedField {
    /// Creates a weighted field.
    pub fn new(name: impl Into<String>, weight: f32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Creates a field with neutral weight.
    pub fn unweighted(name: impl Into<String>) -> Self {
        Self::new(name, 1.0)
    }
}

impl fmt::Display for WeightedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.weight - 1.0).abs() < f32::EPSILON {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}^{}", self.name, self.weight)
        }
    }
}

impl FromStr for WeightedField {
    type Err = DslError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let (name, weight) = match spec.split_once('^') {
            Some((name, weight)) => (name, Some(weight)),
            None => (spec, None),
        };

        if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '^') {
            return Err(DslError::InvalidFieldSpec(s.to_string()));
        }

        let weight = match weight {
            None => 1.0,
            Some(text) => match text.parse::<f32>() {
                Ok(value) if value.is_finite() && value > 0.0 => value,
                _ => {
                    return Err(DslError::InvalidWeight {
                        field: name.to_string(),
                        weight: text.to_string(),
                    });
                }
            },
        };

        Ok(Self::new(name, weight))
    }
}

/// The ordered, non-empty list of fields searched when a query has no field scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SearchFields(Vec<WeightedField>);

impl SearchFields {
    /// Creates a field list, rejecting an empty one.
    pub fn new(fields: Vec<WeightedField>) -> Result<Self, DslError> {
        if fields.is_empty() {
            return Err(DslError::EmptyFieldList);
        }
        Ok(Self(fields))
    }

    /// Parses a list of `name^weight` specs.
    pub fn parse<I, S>(specs: I) -> Result<Self, DslError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = specs
            .into_iter()
            .map(|spec| spec.as_ref().parse())
            .collect::<Result<Vec<WeightedField>, _>>()?;
        Self::new(fields)
    }

    /// Returns the fields in order.
    pub fn as_slice(&self) -> &[WeightedField] {
        &self.0
    }

    /// Returns true if a field with this name is in the list.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|field| field.name == name)
    }

    /// Returns the fields in `name^weight` form.
    pub fn specs(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self(vec![
            WeightedField::new("title", weight::TITLE),
            WeightedField::new("tags", weight::TAGS),
            WeightedField::new("path", weight::PATH),
            WeightedField::new("body", weight::BODY),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_weighted() {
        let field: WeightedField = "title^3".parse().unwrap();
        assert_eq!(field, WeightedField::new("title", 3.0));

        let field: WeightedField = " tags^2.5 ".parse().unwrap();
        assert_eq!(field, WeightedField::new("tags", 2.5));
    }

    #[test]
    fn parse_unweighted() {
        let field: WeightedField = "body".parse().unwrap();
        assert_eq!(field, WeightedField::unweighted("body"));
    }

    #[test]
    fn parse_rejects_bad_specs() {
        assert_eq!(
            "".parse::<WeightedField>(),
            Err(DslError::InvalidFieldSpec(String::new()))
        );
        assert!(matches!(
            "^2".parse::<WeightedField>(),
            Err(DslError::InvalidFieldSpec(_))
        ));
        assert!(matches!(
            "my field".parse::<WeightedField>(),
            Err(DslError::InvalidFieldSpec(_))
        ));
        assert!(matches!(
            "a^b^c".parse::<WeightedField>(),
            Err(DslError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn parse_rejects_bad_weights() {
        for spec in ["title^", "title^x", "title^0", "title^-1", "title^inf", "title^NaN"] {
            assert!(
                matches!(spec.parse::<WeightedField>(), Err(DslError::InvalidWeight { .. })),
                "spec {spec}"
            );
        }
    }

    #[test]
    fn display() {
        assert_eq!(WeightedField::new("title", 3.0).to_string(), "title^3");
        assert_eq!(WeightedField::new("tags", 2.5).to_string(), "tags^2.5");
        assert_eq!(WeightedField::unweighted("body").to_string(), "body");
    }

    #[test]
    fn default_fields() {
        let fields = SearchFields::default();
        assert_eq!(fields.specs(), vec!["title^3", "tags^2.5", "path^2", "body"]);
        assert!(fields.contains("path"));
        assert!(!fields.contains("author"));
    }

    #[test]
    fn empty_list_rejected() {
        assert_eq!(
            SearchFields::parse(Vec::<String>::new()),
            Err(DslError::EmptyFieldList)
        );
    }

    #[test]
    fn parse_list() {
        let fields = SearchFields::parse(["title^2", "body"]).unwrap();
        assert_eq!(fields.as_slice().len(), 2);
        assert_eq!(fields.as_slice()[0].weight, 2.0);
    }
}
