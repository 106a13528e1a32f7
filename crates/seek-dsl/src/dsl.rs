//! Backend query construction.
//!
//! [`QueryDsl`] is the service the structured builder delegates to once field scoping has been
//! resolved. [`ElasticDsl`] emits Elasticsearch-style query JSON.

use serde_json::{Map, Value, json};

use crate::fields::WeightedField;

/// The role of a clause inside a boolean composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occur {
    /// The clause must match.
    Must,
    /// The clause may match; at least one `Should` clause must match when any are present.
    Should,
    /// The clause must not match.
    MustNot,
}

impl Occur {
    /// Returns the key used for this role in a `bool` query.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Must => "must",
            Self::Should => "should",
            Self::MustNot => "must_not",
        }
    }
}

/// Constructs backend queries against concrete fields.
///
/// Every text operation receives the resolved target fields: either a single named field or the
/// whole default field list.
pub trait QueryDsl {
    /// The backend query type.
    type Query;

    /// Matches documents containing every word of `terms` in any of `fields`.
    fn match_terms(&self, fields: &[WeightedField], terms: &[String]) -> Self::Query;

    /// Matches the words of `terms` in order.
    fn phrase(&self, fields: &[WeightedField], terms: &[String]) -> Self::Query;

    /// Matches words starting with `prefix`.
    fn prefix(&self, fields: &[WeightedField], prefix: &str) -> Self::Query;

    /// Matches every document.
    fn match_all(&self) -> Self::Query;

    /// Matches documents where `field` has a value.
    fn exists(&self, field: &str) -> Self::Query;

    /// Combines clauses, each tagged with its role.
    fn compose(&self, clauses: Vec<(Occur, Self::Query)>) -> Self::Query;

    /// Matches values between the inclusive bounds; either bound may be open.
    fn range(&self, fields: &[WeightedField], start: Option<&str>, end: Option<&str>)
    -> Self::Query;
}

/// Emits Elasticsearch-style query DSL as JSON values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElasticDsl;

impl ElasticDsl {
    /// Builds a `multi_match` query over weighted fields.
    fn multi_match(fields: &[WeightedField], query: &str, options: &[(&str, &str)]) -> Value {
        let mut body = Map::new();
        body.insert("query".into(), json!(query));
        body.insert("fields".into(), json!(fields));
        for (key, value) in options {
            body.insert((*key).into(), json!(value));
        }
        json!({ "multi_match": body })
    }

    /// Builds the bounds object of a range query.
    fn bounds(start: Option<&str>, end: Option<&str>) -> Value {
        let mut bounds = Map::new();
        if let Some(start) = start {
            bounds.insert("gte".into(), json!(start));
        }
        if let Some(end) = end {
            bounds.insert("lte".into(), json!(end));
        }
        Value::Object(bounds)
    }
}

impl QueryDsl for ElasticDsl {
    type Query = Value;

    fn match_terms(&self, fields: &[WeightedField], terms: &[String]) -> Value {
        let query = terms.join(" ");
        match fields {
            [field] => json!({ "match": { &field.name: { "query": query, "operator": "and" } } }),
            _ => Self::multi_match(fields, &query, &[("operator", "and")]),
        }
    }

    fn phrase(&self, fields: &[WeightedField], terms: &[String]) -> Value {
        let query = terms.join(" ");
        match fields {
            [field] => json!({ "match_phrase": { &field.name: { "query": query } } }),
            _ => Self::multi_match(fields, &query, &[("type", "phrase")]),
        }
    }

    fn prefix(&self, fields: &[WeightedField], prefix: &str) -> Value {
        match fields {
            [field] => json!({ "prefix": { &field.name: { "value": prefix } } }),
            _ => Self::multi_match(fields, prefix, &[("type", "phrase_prefix")]),
        }
    }

    fn match_all(&self) -> Value {
        json!({ "match_all": {} })
    }

    fn exists(&self, field: &str) -> Value {
        json!({ "exists": { "field": field } })
    }

    fn compose(&self, clauses: Vec<(Occur, Value)>) -> Value {
        let mut must = Vec::new();
        let mut should = Vec::new();
        let mut must_not = Vec::new();
        for (occur, clause) in clauses {
            match occur {
                Occur::Must => must.push(clause),
                Occur::Should => should.push(clause),
                Occur::MustNot => must_not.push(clause),
            }
        }

        let needs_minimum = !must.is_empty() && !should.is_empty();
        let mut body = Map::new();
        for (occur, list) in [
            (Occur::Must, must),
            (Occur::Should, should),
            (Occur::MustNot, must_not),
        ] {
            if !list.is_empty() {
                body.insert(occur.as_str().into(), Value::Array(list));
            }
        }
        if needs_minimum {
            body.insert("minimum_should_match".into(), json!(1));
        }
        json!({ "bool": body })
    }

    fn range(&self, fields: &[WeightedField], start: Option<&str>, end: Option<&str>) -> Value {
        let bounds = Self::bounds(start, end);
        match fields {
            [field] => json!({ "range": { &field.name: bounds } }),
            _ => {
                let clauses = fields
                    .iter()
                    .map(|field| (Occur::Should, json!({ "range": { &field.name: bounds } })))
                    .collect();
                self.compose(clauses)
            }
        }
    }
}
