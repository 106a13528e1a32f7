//! Structured query output for seek.
//!
//! Compiles search-box queries into Elasticsearch-style query JSON:
//!
//! - Unscoped words search a weighted list of default fields (`title^3, tags^2.5, path^2, body`)
//!   with `multi_match`
//! - Scoped words (`title:rust`) use single-field `match`, `match_phrase` and `prefix`
//! - Boolean structure becomes `bool` with `must`, `should` and `must_not`
//! - Ranges become `range` with `gte` / `lte`
//!
//! # Example
//!
//! ```
//! use seek_dsl::parse;
//! use seek_query::{ALL_FIELDS, DefaultOperator};
//!
//! let query = parse("title:guide -draft", ALL_FIELDS, DefaultOperator::And).unwrap();
//! assert!(query.get("bool").is_some());
//! ```

#![warn(missing_docs)]

mod builder;
mod dsl;
mod error;
mod fields;

use seek_query::{
    ALL_FIELDS, DefaultOperator, ExplainBuilder, explain, normalize_field, parse_any_with,
    parse_with,
};
use serde_json::Value;
use tracing::debug;

pub use builder::StructuredBuilder;
pub use dsl::{ElasticDsl, Occur, QueryDsl};
pub use error::DslError;
pub use fields::{SearchFields, WeightedField, weight};

/// Compiles a query string into query JSON using the default search fields.
///
/// Returns `None` for queries without clauses.
pub fn parse(input: &str, default_field: &str, operator: DefaultOperator) -> Option<Value> {
    QueryCompiler::default()
        .with_default_field(default_field)
        .with_operator(operator)
        .compile(input)
}

/// Compiles query strings with fixed settings.
#[derive(Debug, Clone)]
pub struct QueryCompiler {
    /// Builder carrying the default search fields.
    builder: StructuredBuilder<ElasticDsl>,
    /// Field scope for unscoped words; empty for the default field list.
    default_field: String,
    /// How implicit clause runs are combined.
    operator: DefaultOperator,
}

impl Default for QueryCompiler {
    fn default() -> Self {
        Self::new(SearchFields::default())
    }
}

impl QueryCompiler {
    /// Creates a compiler searching `fields` by default.
    pub fn new(fields: SearchFields) -> Self {
        Self {
            builder: StructuredBuilder::new(ElasticDsl, fields),
            default_field: ALL_FIELDS.to_string(),
            operator: DefaultOperator::default(),
        }
    }

    /// Sets the field scope for unscoped words. `""` and `<all>` mean the default field list.
    pub fn with_default_field(mut self, field: &str) -> Self {
        self.default_field = normalize_field(field).to_string();
        self
    }

    /// Sets the default operator.
    pub fn with_operator(mut self, operator: DefaultOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Returns the default search fields.
    pub fn fields(&self) -> &SearchFields {
        self.builder.fields()
    }

    /// Returns the field scope for unscoped words.
    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    /// Returns the default operator.
    pub fn operator(&self) -> DefaultOperator {
        self.operator
    }

    /// Compiles a query string. Returns `None` for queries without clauses.
    pub fn compile(&self, input: &str) -> Option<Value> {
        let query = parse_with(&self.builder, input, &self.default_field, self.operator);
        debug!(
            input,
            default_field = %self.default_field,
            operator = %self.operator,
            empty = query.is_none(),
            "compiled query"
        );
        query
    }

    /// Explains how a query string is grouped, using the same settings as [`Self::compile`].
    pub fn explain(&self, input: &str) -> String {
        explain(input, &self.default_field, self.operator)
    }

    /// Compiles several query strings as alternatives, each tokenized on its own.
    pub fn compile_any<S: AsRef<str>>(&self, inputs: &[S]) -> Option<Value> {
        let query = parse_any_with(&self.builder, inputs, &self.default_field, self.operator);
        debug!(
            inputs = inputs.len(),
            empty = query.is_none(),
            "compiled alternative queries"
        );
        query
    }

    /// Explains several query strings joined as in [`Self::compile_any`].
    pub fn explain_any<S: AsRef<str>>(&self, inputs: &[S]) -> String {
        parse_any_with(&ExplainBuilder, inputs, &self.default_field, self.operator)
            .unwrap_or_default()
    }
}
