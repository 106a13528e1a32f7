//! Error types for search field configuration.

use thiserror::Error;

/// Errors raised when building the default search field list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DslError {
    /// No search fields were given.
    #[error("search field list is empty")]
    EmptyFieldList,

    /// A field spec is not of the form `name` or `name^weight`.
    #[error("invalid field spec '{0}' (expected 'name' or 'name^weight')")]
    InvalidFieldSpec(String),

    /// A field weight is not a positive finite number.
    #[error("invalid weight '{weight}' for field '{field}' (expected a positive number)")]
    InvalidWeight {
        /// Field the weight was attached to.
        field: String,
        /// The weight as written.
        weight: String,
    },
}
