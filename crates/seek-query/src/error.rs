//! Error types for query compilation settings.
//!
//! Query text itself never produces an error; only invalid settings passed alongside it do.

use thiserror::Error;

/// Errors raised when configuring a query compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The default operator is neither `and` nor `or`.
    #[error("unknown default operator '{0}' (expected 'and' or 'or')")]
    UnknownOperator(String),
}
