//! Builder abstraction.
//!
//! The parser never constructs query values itself. Every leaf or composite fragment is
//! produced by calling into a [`Builder`], so one grammar can emit backend queries, textual
//! explanations, or anything else with the same structure.

use std::{fmt, str::FromStr};

use crate::error::QueryError;

/// The field name meaning "the default multi-field set".
pub const ALL_FIELDS: &str = "";

/// Spelling of [`ALL_FIELDS`] accepted from callers and normalized to the empty string.
const ALL_FIELDS_ALIAS: &str = "<all>";

/// Normalizes a caller-supplied default field, mapping `<all>` to [`ALL_FIELDS`].
pub fn normalize_field(field: &str) -> &str {
    if field == ALL_FIELDS_ALIAS {
        ALL_FIELDS
    } else {
        field
    }
}

/// How clauses that are not joined by an explicit operator are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DefaultOperator {
    /// Every clause must match; `+` is redundant.
    #[default]
    And,
    /// At least one clause must match; `+` marks a clause as required.
    Or,
}

impl DefaultOperator {
    /// Returns the lowercase name used in configuration files and backend queries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for DefaultOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefaultOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if s.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(QueryError::UnknownOperator(s.to_string()))
        }
    }
}

/// The three clause lists of a boolean composition.
///
/// A document matches when every `must` clause matches, at least one `should` clause matches
/// (or `should` is empty), and no `must_not` clause matches.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolQuery<Q> {
    /// Alternatives; at least one must match unless the list is empty.
    pub should: Vec<Q>,
    /// Clauses that must all match.
    pub must: Vec<Q>,
    /// Clauses that must not match.
    pub must_not: Vec<Q>,
}

impl<Q> Default for BoolQuery<Q> {
    fn default() -> Self {
        Self {
            should: Vec::new(),
            must: Vec::new(),
            must_not: Vec::new(),
        }
    }
}

impl<Q> BoolQuery<Q> {
    /// A composition with only `should` clauses.
    pub fn should(clauses: Vec<Q>) -> Self {
        Self {
            should: clauses,
            ..Self::default()
        }
    }

    /// A composition with only `must` clauses.
    pub fn must(clauses: Vec<Q>) -> Self {
        Self {
            must: clauses,
            ..Self::default()
        }
    }

    /// Adds `must_not` clauses.
    pub fn with_must_not(mut self, clauses: Vec<Q>) -> Self {
        self.must_not = clauses;
        self
    }

    /// Returns true if all three lists are empty.
    pub fn is_empty(&self) -> bool {
        self.should.is_empty() && self.must.is_empty() && self.must_not.is_empty()
    }
}

/// A sink the parser drives to materialize query fragments.
///
/// Implementations must treat every method as a pure function of its arguments. An empty
/// `field` ([`ALL_FIELDS`]) means the builder's default field set.
pub trait Builder {
    /// The value produced for each fragment.
    type Query;

    /// Conjunctive match of every word in `terms` against `field`.
    fn match_terms(&self, field: &str, terms: &[String]) -> Self::Query;

    /// Ordered phrase match.
    fn phrase(&self, field: &str, terms: &[String]) -> Self::Query;

    /// Prefix match.
    fn prefix(&self, field: &str, prefix: &str) -> Self::Query;

    /// Matches every document.
    fn all(&self) -> Self::Query;

    /// Matches documents where `field` is present.
    fn exists(&self, field: &str) -> Self::Query;

    /// Boolean composition of sub-queries.
    fn boolean(&self, query: BoolQuery<Self::Query>) -> Self::Query;

    /// Range on `field`; either bound may be open.
    fn range(&self, field: &str, start: Option<&str>, end: Option<&str>) -> Self::Query;
}
