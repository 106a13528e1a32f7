//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that load fine but will
//! not behave as the user probably intended.

use std::{collections::HashSet, fmt};

use seek_query::is_field_name;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The default field is not one of the search fields.
    DefaultFieldNotSearched {
        /// The configured default field.
        field: String,
    },
    /// A field appears more than once in the search field list.
    DuplicateSearchField {
        /// The repeated field name.
        field: String,
    },
    /// A search field cannot be written as a `name:` prefix in a query.
    UnaddressableField {
        /// The field name.
        field: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultFieldNotSearched { field } => {
                write!(f, "default field '{field}' is not in fields.search")
            }
            Self::DuplicateSearchField { field } => {
                write!(f, "field '{field}' is listed more than once in fields.search")
            }
            Self::UnaddressableField { field } => {
                write!(
                    f,
                    "field '{field}' cannot be used as a 'field:' prefix in queries"
                )
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let search = &config.fields.search;

    let default_field = &config.query.default_field;
    if !default_field.is_empty() && !search.contains(default_field) {
        warnings.push(ConfigWarning::DefaultFieldNotSearched {
            field: default_field.clone(),
        });
    }

    let mut seen = HashSet::new();
    for field in search.as_slice() {
        if !seen.insert(field.name.as_str()) {
            warnings.push(ConfigWarning::DuplicateSearchField {
                field: field.name.clone(),
            });
        }
        if !is_field_name(&field.name) {
            warnings.push(ConfigWarning::UnaddressableField {
                field: field.name.clone(),
            });
        }
    }

    warnings
}
