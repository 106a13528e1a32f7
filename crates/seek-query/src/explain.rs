//! Human-readable rendering of compiled queries.
//!
//! [`ExplainBuilder`] produces a compact boolean notation showing how a query string was
//! grouped, e.g. `title:(a AND b) AND_MAYBE (c OR d) NOT e`.

use crate::{
    builder::{BoolQuery, Builder, DefaultOperator},
    parser::parse_with,
};

/// Builds explanation strings instead of backend queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplainBuilder;

impl ExplainBuilder {
    /// Prefixes `body` with `field:` unless the field is the default set.
    fn scoped(field: &str, body: &str) -> String {
        if field.is_empty() {
            body.to_string()
        } else {
            format!("{field}:{body}")
        }
    }

    /// Renders a clause list, parenthesized when it has more than one clause.
    fn group(clauses: &[String], joiner: &str) -> String {
        match clauses {
            [single] => single.clone(),
            _ => format!("({})", clauses.join(joiner)),
        }
    }
}

impl Builder for ExplainBuilder {
    type Query = String;

    fn match_terms(&self, field: &str, terms: &[String]) -> String {
        Self::scoped(field, &Self::group(terms, " AND "))
    }

    fn phrase(&self, field: &str, terms: &[String]) -> String {
        Self::scoped(field, &format!("\"{}\"", terms.join(" ")))
    }

    fn prefix(&self, field: &str, prefix: &str) -> String {
        Self::scoped(field, &format!("{prefix}*"))
    }

    fn all(&self) -> String {
        "*".to_string()
    }

    fn exists(&self, field: &str) -> String {
        Self::scoped(field, "*")
    }

    fn boolean(&self, query: BoolQuery<String>) -> String {
        let mut parts = Vec::new();
        if !query.must.is_empty() {
            parts.push(Self::group(&query.must, " AND "));
        }
        if !query.should.is_empty() {
            let should = Self::group(&query.should, " OR ");
            if parts.is_empty() {
                parts.push(should);
            } else {
                parts.push(format!("AND_MAYBE {should}"));
            }
        }
        parts.extend(query.must_not.iter().map(|clause| format!("NOT {clause}")));
        parts.join(" ")
    }

    fn range(&self, field: &str, start: Option<&str>, end: Option<&str>) -> String {
        let body = format!("{}..{}", start.unwrap_or_default(), end.unwrap_or_default());
        Self::scoped(field, &body)
    }
}

/// Explains how a query string is grouped.
///
/// Returns an empty string for queries without clauses.
pub fn explain(input: &str, default_field: &str, operator: DefaultOperator) -> String {
    parse_with(&ExplainBuilder, input, default_field, operator).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALL_FIELDS;

    fn and(input: &str) -> String {
        explain(input, ALL_FIELDS, DefaultOperator::And)
    }

    fn or(input: &str) -> String {
        explain(input, ALL_FIELDS, DefaultOperator::Or)
    }

    #[test]
    fn empty() {
        assert_eq!(and(""), "");
        assert_eq!(and("))) ,,"), "");
    }

    #[test]
    fn terms() {
        assert_eq!(and("hello"), "hello");
        assert_eq!(and("hello world"), "(hello AND world)");
    }

    #[test]
    fn exclusion() {
        assert_eq!(and("hello -world"), "hello NOT world");
        assert_eq!(and("-world"), "NOT world");
    }

    #[test]
    fn or_and() {
        assert_eq!(and("a OR b"), "(a OR b)");
        assert_eq!(and("a AND b"), "(a AND b)");
        assert_eq!(and("a AND b OR c"), "((a AND b) OR c)");
    }

    #[test]
    fn phrases_and_prefixes() {
        assert_eq!(and("\"error handling\""), "\"error handling\"");
        assert_eq!(and("async*"), "async*");
    }

    #[test]
    fn fields() {
        assert_eq!(and("title:foo bar"), "title:(foo AND bar)");
        assert_eq!(and("title:*"), "title:*");
        assert_eq!(and("*"), "*");
        assert_eq!(
            explain("foo", "body", DefaultOperator::And),
            "body:foo"
        );
    }

    #[test]
    fn ranges() {
        assert_eq!(and("10..20"), "10..20");
        assert_eq!(and("price:10.."), "price:10..");
        assert_eq!(and("..5"), "..5");
    }

    #[test]
    fn mixed_bool() {
        let b = ExplainBuilder;
        let query = BoolQuery {
            should: vec![b.match_terms("", &["c".into()]), b.match_terms("", &["d".into()])],
            must: vec![b.match_terms("field", &["a".into(), "b".into()])],
            must_not: vec![b.match_terms("", &["e".into()])],
        };
        assert_eq!(b.boolean(query), "field:(a AND b) AND_MAYBE (c OR d) NOT e");
    }

    #[test]
    fn field_scope_reaches_each_leaf_of_a_group() {
        assert_eq!(
            or("title:(a AND b) c OR d -e"),
            "((title:a AND title:b) OR (c OR d)) NOT e"
        );
    }

    #[test]
    fn required_under_or() {
        assert_eq!(or("rust +async -old"), "async AND_MAYBE rust NOT old");
    }

    #[test]
    fn or_operator_splits_runs() {
        assert_eq!(or("hello world"), "(hello OR world)");
    }
}
