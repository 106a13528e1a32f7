//! Query abstract syntax tree.
//!
//! A backend-neutral rendition of a compiled query, built by [`AstBuilder`]. Useful for
//! inspecting how a query string was grouped and for tests that compare structure.

use std::fmt;

use crate::builder::{BoolQuery, Builder};

/// A compiled query fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// Every word must match in the field.
    Match {
        /// Field name, empty for the default field set.
        field: String,
        /// Words to match.
        terms: Vec<String>,
    },

    /// An exact phrase.
    Phrase {
        /// Field name, empty for the default field set.
        field: String,
        /// Words of the phrase, in order.
        terms: Vec<String>,
    },

    /// Words starting with a prefix.
    Prefix {
        /// Field name, empty for the default field set.
        field: String,
        /// The prefix, without the trailing `*`.
        prefix: String,
    },

    /// Matches every document.
    All,

    /// The field is present.
    Exists {
        /// Field name.
        field: String,
    },

    /// Boolean composition.
    Bool(BoolQuery<Self>),

    /// A range with optional bounds.
    Range {
        /// Field name, empty for the default field set.
        field: String,
        /// Lower bound.
        start: Option<String>,
        /// Upper bound.
        end: Option<String>,
    },
}

impl QueryNode {
    /// Formats a leaf's field for tree output.
    fn field_label(field: &str) -> &str {
        if field.is_empty() { "*" } else { field }
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Match { field, terms } => {
                writeln!(f, "{prefix}Match({}, {terms:?})", Self::field_label(field))
            }
            Self::Phrase { field, terms } => {
                writeln!(f, "{prefix}Phrase({}, {terms:?})", Self::field_label(field))
            }
            Self::Prefix { field, prefix: p } => {
                writeln!(f, "{prefix}Prefix({}, {p:?})", Self::field_label(field))
            }
            Self::All => writeln!(f, "{prefix}All"),
            Self::Exists { field } => writeln!(f, "{prefix}Exists({field})"),
            Self::Range { field, start, end } => writeln!(
                f,
                "{prefix}Range({}, {start:?}, {end:?})",
                Self::field_label(field)
            ),
            Self::Bool(query) => {
                writeln!(f, "{prefix}Bool")?;
                for (label, clauses) in [
                    ("must", &query.must),
                    ("should", &query.should),
                    ("must_not", &query.must_not),
                ] {
                    if clauses.is_empty() {
                        continue;
                    }
                    writeln!(f, "{prefix}  {label}:")?;
                    for clause in clauses {
                        clause.fmt_tree(f, indent + 2)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Builds [`QueryNode`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstBuilder;

impl Builder for AstBuilder {
    type Query = QueryNode;

    fn match_terms(&self, field: &str, terms: &[String]) -> QueryNode {
        QueryNode::Match {
            field: field.to_string(),
            terms: terms.to_vec(),
        }
    }

    fn phrase(&self, field: &str, terms: &[String]) -> QueryNode {
        QueryNode::Phrase {
            field: field.to_string(),
            terms: terms.to_vec(),
        }
    }

    fn prefix(&self, field: &str, prefix: &str) -> QueryNode {
        QueryNode::Prefix {
            field: field.to_string(),
            prefix: prefix.to_string(),
        }
    }

    fn all(&self) -> QueryNode {
        QueryNode::All
    }

    fn exists(&self, field: &str) -> QueryNode {
        QueryNode::Exists {
            field: field.to_string(),
        }
    }

    fn boolean(&self, query: BoolQuery<QueryNode>) -> QueryNode {
        QueryNode::Bool(query)
    }

    fn range(&self, field: &str, start: Option<&str>, end: Option<&str>) -> QueryNode {
        QueryNode::Range {
            field: field.to_string(),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }
}
