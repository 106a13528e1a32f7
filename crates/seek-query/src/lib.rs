//! Search-box query compiler for seek.
//!
//! This crate turns the kind of string people type into a search box into a structured query.
//! Parsing never fails: malformed input degrades to whatever structure can be recovered.
//!
//! - **Terms**: `rust async` - words that must all appear
//! - **Phrases**: `"error handling"` - exact sequences
//! - **Prefixes**: `async*` - words starting with a prefix
//! - **Required**: `+rust` - must match, even under the `or` default operator
//! - **Negation**: `-deprecated` or `NOT deprecated` - must NOT appear
//! - **OR / AND**: `rust OR golang`, `rust AND async` - explicit operators (uppercase)
//! - **Grouping**: `(a b) OR (c d)` - precedence control
//! - **Fields**: `title:guide`, `title:*` - search or test a specific field
//! - **Ranges**: `2020..2024`, `10..`, `..5`
//!
//! The parser emits every fragment through a [`Builder`]. [`ExplainBuilder`] renders a compact
//! string, [`AstBuilder`] a [`QueryNode`] tree; backend builders live in other crates.
//!
//! # Example
//!
//! ```
//! use seek_query::{ALL_FIELDS, DefaultOperator, explain};
//!
//! let text = explain("title:guide (rust OR golang) -deprecated", ALL_FIELDS, DefaultOperator::And);
//! assert_eq!(text, "(title:guide AND (rust OR golang)) NOT deprecated");
//! ```

#![warn(missing_docs)]

mod ast;
mod builder;
mod cursor;
mod error;
mod explain;
mod lexer;
mod parser;

pub use ast::{AstBuilder, QueryNode};
pub use builder::{ALL_FIELDS, BoolQuery, Builder, DefaultOperator, normalize_field};
pub use cursor::Cursor;
pub use error::QueryError;
pub use explain::{ExplainBuilder, explain};
pub use lexer::{Token, TokenKind, is_field_name, tokenize, tokenize_bytes};
pub use parser::{Parser, parse_any_with, parse_with};
