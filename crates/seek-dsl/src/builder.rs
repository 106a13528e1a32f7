//! Structured query builder.
//!
//! Resolves the parser's field scope to concrete fields and delegates each fragment to a
//! [`QueryDsl`].

use std::borrow::Cow;

use seek_query::{BoolQuery, Builder};

use crate::{
    dsl::{Occur, QueryDsl},
    fields::{SearchFields, WeightedField},
};

/// A [`Builder`] emitting backend queries through a [`QueryDsl`].
#[derive(Debug, Clone, Default)]
pub struct StructuredBuilder<D> {
    /// Backend query constructor.
    dsl: D,
    /// Fields searched when a fragment has no field scope.
    fields: SearchFields,
}

impl<D: QueryDsl> StructuredBuilder<D> {
    /// Creates a builder searching `fields` by default.
    pub fn new(dsl: D, fields: SearchFields) -> Self {
        Self { dsl, fields }
    }

    /// Returns the default search fields.
    pub fn fields(&self) -> &SearchFields {
        &self.fields
    }

    /// Resolves a field scope: the default list for an empty scope, otherwise the named field.
    fn targets(&self, field: &str) -> Cow<'_, [WeightedField]> {
        if field.is_empty() {
            Cow::Borrowed(self.fields.as_slice())
        } else {
            Cow::Owned(vec![WeightedField::unweighted(field)])
        }
    }
}

impl<D: QueryDsl> Builder for StructuredBuilder<D> {
    type Query = D::Query;

    fn match_terms(&self, field: &str, terms: &[String]) -> D::Query {
        self.dsl.match_terms(&self.targets(field), terms)
    }

    fn phrase(&self, field: &str, terms: &[String]) -> D::Query {
        self.dsl.phrase(&self.targets(field), terms)
    }

    fn prefix(&self, field: &str, prefix: &str) -> D::Query {
        self.dsl.prefix(&self.targets(field), prefix)
    }

    fn all(&self) -> D::Query {
        self.dsl.match_all()
    }

    fn exists(&self, field: &str) -> D::Query {
        self.dsl.exists(field)
    }

    fn boolean(&self, query: BoolQuery<D::Query>) -> D::Query {
        let BoolQuery {
            should,
            must,
            must_not,
        } = query;

        let clauses: Vec<(Occur, D::Query)> = must
            .into_iter()
            .map(|q| (Occur::Must, q))
            .chain(should.into_iter().map(|q| (Occur::Should, q)))
            .chain(must_not.into_iter().map(|q| (Occur::MustNot, q)))
            .collect();

        self.dsl.compose(clauses)
    }

    fn range(&self, field: &str, start: Option<&str>, end: Option<&str>) -> D::Query {
        self.dsl.range(&self.targets(field), start, end)
    }
}
