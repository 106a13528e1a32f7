//! seek: search-box query compiler
//!
//! seek turns the query language people type into search boxes (words, quoted phrases, `-`
//! and `+` prefixes, `field:` scopes, `AND`/`OR`/`NOT`, ranges and wildcards) into
//! structured search-engine queries.
//!
//! The binary exposes the compiler for inspection: `seek parse` prints the query DSL,
//! `seek explain` prints a compact infix rendering, and `seek tokens` shows the lexer output.
//! Project settings live in `.seek.toml` files.

#![warn(missing_docs)]

pub mod cli;
